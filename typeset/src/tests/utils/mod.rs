// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod doc;

pub(crate) use doc::{line_ranges, TestDoc, ADVANCE};
