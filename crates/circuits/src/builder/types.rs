// Copyright 2025 zkfloat developers

use zkfloat_core::{LinearCombination, WitnessIndex};

pub type F = zkfloat_field::Fr;
pub type Lc = LinearCombination<F>;
pub type Witness<'cs> = WitnessIndex<'cs, F>;
