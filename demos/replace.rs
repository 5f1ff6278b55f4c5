// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_fluent::{Expression, PresetCharSetName, Substitution};

pub fn main() {
    // swap "first last" into "last, first"
    let pattern = Expression::new()
        .named_group(
            "first",
            Expression::new().one_or_more(Expression::new().preset(PresetCharSetName::CharWord)),
        )
        .char(' ')
        .named_group(
            "last",
            Expression::new().one_or_more(Expression::new().preset(PresetCharSetName::CharWord)),
        )
        .to_pattern()
        .unwrap();

    let replacement = Substitution::new()
        .named_group("last")
        .text(", ")
        .named_group("first")
        .to_text()
        .unwrap();

    println!("pattern:     {}", pattern);
    println!("replacement: {}", replacement);
}
