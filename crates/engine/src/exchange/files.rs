// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io;
use std::path::Path;

/// Filesystem access for import and export.
pub trait FileAccess: Send + Sync {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Local disk. Writes replace the target atomically.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileAccess for LocalFiles {
    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_file(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        deck_storage::write_atomic(path, bytes)
    }
}
