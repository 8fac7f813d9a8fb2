/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.
The handlers are intentionally small: they build the store from
configuration, await its initialization, and render results for the
terminal.
*/

pub mod sessions;
