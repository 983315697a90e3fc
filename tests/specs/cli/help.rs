// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and version output.

use crate::prelude::*;

#[test]
fn help_lists_top_level_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("agent")
        .stdout_has("run")
        .stdout_has("settings");
}

#[test]
fn agent_help_lists_subcommands() {
    cli()
        .args(&["agent", "--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("export")
        .stdout_has("import")
        .stdout_has("catalog");
}

#[test]
fn settings_help_lists_subcommands() {
    cli()
        .args(&["settings", "--help"])
        .passes()
        .stdout_has("allow")
        .stdout_has("env")
        .stdout_has("binary");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}
