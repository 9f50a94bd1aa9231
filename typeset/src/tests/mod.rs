// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_errors;
mod test_truncate;
mod utils;
