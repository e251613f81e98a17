// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use metashop_ddl::{explain, parse};
use test_each_file::test_each_file;

test_each_file! { for ["sql", "expected"] in "crates/ddl/tests/scripts" as explain => run_test }

fn run_test([sql, expected]: [&str; 2]) {
	let actual = explain(&parse(sql));
	assert_eq!(actual, expected.replace("\r\n", "\n"));
}
