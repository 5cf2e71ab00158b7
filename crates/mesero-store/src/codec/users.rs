//! # User Binary Codec
//!
//! Fixed-layout binary encoding of user accounts and their page-access
//! permissions. All integers are 64-bit little-endian.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  count: u64                                                         │
//! │  per user:                                                          │
//! │    id: u64                                                          │
//! │    name_len: u64   name: name_len raw UTF-8 bytes                   │
//! │    password_hash: u64                                               │
//! │    perm_count: u64                                                  │
//! │    per permission:                                                  │
//! │      page: u64     access: u64 (0=denied, 1=view-only, 2=editable)  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The original format read declared lengths without validating them
//! against the remaining stream, so a truncated file produced undefined
//! trailing data. Here every read is bounds-checked and truncation fails
//! with a parse error naming the byte offset.

use std::fs;
use std::path::Path;

use mesero_core::{AccessLevel, PageAccess, User};

use crate::error::{StoreError, StoreResult};

/// Decodes the users file.
pub fn decode(path: &Path) -> StoreResult<Vec<User>> {
    let data = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let mut cursor = ByteCursor::new(path, &data);

    let count = cursor.read_u64()?;
    let mut users = Vec::new();
    for _ in 0..count {
        users.push(read_user(&mut cursor)?);
    }
    Ok(users)
}

fn read_user(cursor: &mut ByteCursor<'_>) -> StoreResult<User> {
    let id = cursor.read_u64()? as i64;
    let name_len = cursor.read_u64()?;
    let name_bytes = cursor.read_bytes(name_len)?;
    let name = String::from_utf8(name_bytes.to_vec())
        .map_err(|_| cursor.malformed("user name is not valid UTF-8"))?;
    let password_hash = cursor.read_u64()?;

    let perm_count = cursor.read_u64()?;
    let mut permissions = Vec::new();
    for _ in 0..perm_count {
        let page = cursor.read_u64()? as usize;
        let raw_access = cursor.read_u64()?;
        let access = AccessLevel::from_raw(raw_access)
            .ok_or_else(|| cursor.malformed(format!("invalid access level {raw_access}")))?;
        permissions.push(PageAccess::new(page, access));
    }

    Ok(User {
        id,
        name,
        password_hash,
        permissions,
    })
}

/// Encodes the user list to the users file.
pub fn encode(users: &[User], path: &Path) -> StoreResult<()> {
    let mut out = Vec::new();
    out.extend_from_slice(&(users.len() as u64).to_le_bytes());

    for user in users {
        out.extend_from_slice(&(user.id as u64).to_le_bytes());
        out.extend_from_slice(&(user.name.len() as u64).to_le_bytes());
        out.extend_from_slice(user.name.as_bytes());
        out.extend_from_slice(&user.password_hash.to_le_bytes());
        out.extend_from_slice(&(user.permissions.len() as u64).to_le_bytes());
        for permission in &user.permissions {
            out.extend_from_slice(&(permission.page as u64).to_le_bytes());
            out.extend_from_slice(&permission.access.as_raw().to_le_bytes());
        }
    }

    fs::write(path, out).map_err(|e| StoreError::io(path, e))
}

// =============================================================================
// Bounds-Checked Cursor
// =============================================================================

/// Read cursor over the raw file bytes. Every read checks the remaining
/// length first; failures report the byte offset where the data ran out.
pub(crate) struct ByteCursor<'a> {
    path: &'a Path,
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub(crate) fn new(path: &'a Path, data: &'a [u8]) -> Self {
        ByteCursor {
            path,
            data,
            offset: 0,
        }
    }

    pub(crate) fn read_u64(&mut self) -> StoreResult<u64> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.read_bytes(8)?);
        Ok(u64::from_le_bytes(bytes))
    }

    pub(crate) fn read_f64(&mut self) -> StoreResult<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub(crate) fn read_bytes(&mut self, len: u64) -> StoreResult<&'a [u8]> {
        let len = usize::try_from(len)
            .map_err(|_| self.malformed(format!("declared length {len} overflows")))?;
        let remaining = self.data.len() - self.offset;
        if len > remaining {
            return Err(self.malformed(format!(
                "truncated record: need {len} bytes, {remaining} left"
            )));
        }
        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    pub(crate) fn malformed(&self, message: impl Into<String>) -> StoreError {
        StoreError::parse(
            self.path,
            0,
            format!("{} (at byte offset {})", message.into(), self.offset),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
