// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_fluent::{CharSet, Expression, FlagSet};

pub fn main() {
    hex_color();
    quoted_word();
}

fn hex_color() {
    // `#(?<red>[0-9a-fA-F]{2})(?<green>[0-9a-fA-F]{2})(?<blue>[0-9a-fA-F]{2})`
    let hex_pair =
        || Expression::new().repeat(CharSet::new().range('0', '9').range('a', 'f').range('A', 'F'), 2);

    let pattern = Expression::new()
        .char('#')
        .named_group("red", hex_pair())
        .named_group("green", hex_pair())
        .named_group("blue", hex_pair())
        .to_pattern()
        .unwrap();

    println!("hex color: {}", pattern);
}

fn quoted_word() {
    // a case-insensitive word between quotes, e.g. `"(?i:\w+)"`
    let pattern = Expression::new()
        .char('"')
        .with_options(
            FlagSet::IGNORE_CASE,
            FlagSet::empty(),
            Expression::new().one_or_more(Expression::new().preset(
                regex_fluent::PresetCharSetName::CharWord,
            )),
        )
        .char('"')
        .to_pattern()
        .unwrap();

    println!("quoted word: {}", pattern);
}
