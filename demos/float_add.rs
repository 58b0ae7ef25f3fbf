// Copyright 2025 zkfloat developers

use anyhow::{ensure, Result};
use clap::{value_parser, Parser};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use zkfloat_circuits::{
	builder::{test_utils::validate_circuit, types::Witness, ConstraintSystemBuilder},
	float::{reference, FloatAdd, FloatFormat, FloatValue},
};
use zkfloat_core::{ConstraintSystemStat, Visibility};
use zkfloat_utils::{env::boolean_env_flag_set, rayon::adjust_thread_pool, tracing::init_tracing};

#[derive(Debug, Parser)]
struct Args {
	/// Width of the exponent in bits.
	#[arg(short = 'k', long, default_value_t = 8, value_parser = value_parser!(u32).range(1..=64))]
	exponent_bits: u32,
	/// Number of fractional mantissa bits.
	#[arg(short, long, default_value_t = 23, value_parser = value_parser!(u32).range(1..))]
	precision: u32,
	/// The number of additions to witness and validate.
	#[arg(short, long, default_value_t = 1024, value_parser = value_parser!(u32).range(1..))]
	n_additions: u32,
	/// Seed for the random operands.
	#[arg(long, default_value_t = 0)]
	seed: u64,
}

fn main() -> Result<()> {
	adjust_thread_pool()
		.as_ref()
		.expect("failed to init thread pool");

	let args = Args::parse();

	init_tracing();

	let format = FloatFormat::new(args.exponent_bits as usize, args.precision as usize)?;
	println!(
		"Validating {} additions with {} exponent bits and precision {}",
		args.n_additions,
		format.exponent_bits(),
		format.precision()
	);

	let synthesis_scope = tracing::info_span!("synthesizing circuit").entered();
	let mut builder = ConstraintSystemBuilder::new();
	let add = FloatAdd::new_with_inputs(&mut builder, "float", format, Visibility::Public)?;
	let constraint_system = builder.build()?;
	drop(synthesis_scope);

	print!("{}", ConstraintSystemStat::new(&constraint_system, 2));
	if boolean_env_flag_set("ZKFLOAT_PRINT_CONSTRAINTS") {
		println!("{constraint_system}");
	}

	// Keep exponents close together so that most additions take the arithmetic path.
	let mut rng = StdRng::seed_from_u64(args.seed);
	let operands = (0..args.n_additions)
		.map(|_| {
			let base = rng.gen_range(1..=format.max_exponent());
			let low = base.saturating_sub(format.precision() as u64 + 2);
			(
				format.random_value_in(&mut rng, low..=base),
				if rng.gen_bool(0.05) {
					FloatValue::ZERO
				} else {
					format.random_value_in(&mut rng, low..=base)
				},
			)
		})
		.collect::<Vec<_>>();

	let witness_scope = tracing::info_span!("generating witnesses").entered();
	let n_valid = operands
		.par_iter()
		.map(|&(a, b)| -> Result<()> {
			let mut witness = Witness::new(&constraint_system);
			add.assign_inputs(&mut witness, a, b)?;
			add.populate(&mut witness)?;
			validate_circuit(&constraint_system, &witness)?;

			let sum = add.output(&witness)?;
			let expected = reference::add(add.format(), a, b)?;
			ensure!(sum == expected, "{a} + {b}: circuit gives {sum}, reference gives {expected}");
			Ok(())
		})
		.collect::<Result<Vec<_>>>()?
		.len();
	drop(witness_scope);

	println!("Validated {n_valid} additions");

	Ok(())
}
