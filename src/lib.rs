// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) parses arguments and dispatches into these modules.
//
// Module responsibilities:
// - `api`: Encapsulates HTTP interactions with the CGC gateway (GET,
//   PATCH, signed-URL download) and the typed errors they produce.
// - `update`: Turns `key=value` command-line tokens into the PATCH
//   payload for file metadata updates.
// - `files`: File-level operations: recursive project tree listing,
//   detail lookup, metadata update, download.
// - `projects`: Project listing and its tabular rendering.
// - `output`: Pretty-printed JSON rendering shared by the commands.
// - `cli`: Command definitions, token resolution and dispatch.
//
// Keeping this separation keeps the encoding, tree collection and
// formatting logic testable without a network connection.
pub mod api;
pub mod cli;
pub mod files;
pub mod output;
pub mod projects;
pub mod update;
