// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use bitflags::bitflags;

bitflags! {
    /// Inline matching-mode flags, written inside `(?...)` constructs.
    ///
    /// A flag set applied through an option group is in force only for the
    /// body of that group; sibling and parent content keep the flags that
    /// were active before the group started.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FlagSet: u8 {
        /// `i`: case-insensitive matching.
        const IGNORE_CASE = 0b0000_0001;
        /// `m`: `^` and `$` also match at line boundaries.
        const MULTILINE = 0b0000_0010;
        /// `n`: only explicitly named or numbered groups capture.
        const EXPLICIT_CAPTURE = 0b0000_0100;
        /// `s`: `.` also matches newline.
        const SINGLELINE = 0b0000_1000;
        /// `x`: unescaped white space in the pattern is ignored.
        const IGNORE_WHITESPACE = 0b0001_0000;
    }
}

impl FlagSet {
    /// Write the flag letters in the canonical `imnsx` order.
    pub(crate) fn flags_text(&self) -> String {
        let mut text = String::new();
        if self.contains(FlagSet::IGNORE_CASE) {
            text.push('i');
        }
        if self.contains(FlagSet::MULTILINE) {
            text.push('m');
        }
        if self.contains(FlagSet::EXPLICIT_CAPTURE) {
            text.push('n');
        }
        if self.contains(FlagSet::SINGLELINE) {
            text.push('s');
        }
        if self.contains(FlagSet::IGNORE_WHITESPACE) {
            text.push('x');
        }
        text
    }
}
