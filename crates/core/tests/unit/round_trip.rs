//! # Generate-then-validate Properties
//!
//! Everything the generator emits must validate with zero errors, under every rendering
//! option. The validator must also agree with the constraint predicates on arbitrary
//! immediates.

use proptest::prelude::*;
use rvforge_core::config::Radix;
use rvforge_core::generator::{GenerationRequest, RenderOptions, Renderer};
use rvforge_core::isa::constraints::is_valid_immediate;
use rvforge_core::validator::FindingCode;
use rvforge_core::{Catalog, Generator, InstructionFormat, Validator};

fn render_options() -> impl Strategy<Value = RenderOptions> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(hex, annotate, abi_names, memory_syntax, prelude)| RenderOptions {
            radix: if hex { Radix::Hexadecimal } else { Radix::Decimal },
            annotate,
            abi_names,
            memory_syntax,
            prelude,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_generated_listing_validates(seed in any::<u64>(), options in render_options()) {
        let catalog = Catalog::builtin();
        let generation = Generator::new(&catalog)
            .generate_seeded(&GenerationRequest::all(3), seed)
            .unwrap();
        let listing = Renderer::new(options).listing(&generation);

        let report = Validator::new(&catalog).validate_str(&listing);
        let errors: Vec<String> = report.errors().map(|(n, f)| format!("{n}: {f}")).collect();
        prop_assert!(errors.is_empty(), "{:?}", errors);
        prop_assert_eq!(report.summary.instruction_lines, generation.len());
        prop_assert_eq!(report.summary.valid_instructions, generation.len());
    }

    #[test]
    fn prop_validator_agrees_with_immediate_predicate(
        format_idx in 1..6usize,
        value in -1_100_000i64..1_100_000,
        memory_form in any::<bool>(),
    ) {
        let format = InstructionFormat::ALL[format_idx];
        let catalog = Catalog::builtin();
        let spec = catalog.list(Some(format))[0];
        let line = match format {
            InstructionFormat::I | InstructionFormat::B => {
                format!("{} x1, x2, {value}", spec.mnemonic)
            }
            InstructionFormat::S if memory_form => format!("{} x1, {value}(x2)", spec.mnemonic),
            InstructionFormat::S => format!("{} x1, x2, {value}", spec.mnemonic),
            _ => format!("{} x1, {value}", spec.mnemonic),
        };

        let verdict = Validator::new(&catalog).validate_line(1, &line);
        let immediate_error = verdict.has(FindingCode::ImmediateOutOfRange)
            || verdict.has(FindingCode::MisalignedImmediate);
        prop_assert_eq!(immediate_error, !is_valid_immediate(format, value));
        prop_assert_eq!(verdict.error_count(), usize::from(immediate_error));
    }

    #[test]
    fn prop_same_seed_same_listing(seed in any::<u64>()) {
        let catalog = Catalog::builtin();
        let generator = Generator::new(&catalog);
        let request = GenerationRequest::mnemonics(["add", "lw", "sw", "beq", "lui", "jal"], 4);
        let renderer = Renderer::default();
        let first = renderer.listing(&generator.generate_seeded(&request, seed).unwrap());
        let second = renderer.listing(&generator.generate_seeded(&request, seed).unwrap());
        prop_assert_eq!(first, second);
    }
}
