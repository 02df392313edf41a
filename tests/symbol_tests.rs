// Reads a Base 256 field back out of a Data Matrix codeword stream
#[cfg(test)]
fn base256_field(cw: &[u16], latch: usize) -> Vec<u8> {
    assert_eq!(cw[latch], 231, "No Base 256 latch at {latch}");
    let unrandomize = |i: usize| ((cw[i] as i32 - ((149 * (i + 1)) % 255 + 1) as i32).rem_euclid(256)) as usize;

    let mut i = latch + 1;
    let d1 = unrandomize(i);
    i += 1;
    let len = if d1 <= 249 {
        d1
    } else {
        let d2 = unrandomize(i);
        i += 1;
        250 * (d1 - 249) + d2
    };
    (i..i + len).map(|k| unrandomize(k) as u8).collect()
}

#[cfg(test)]
mod symbol_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use barcodism::{
        common::{
            append::{plan, AppendTemplate},
            ec::{GaloisField, ReedSolomon},
            gs1::Gs1Message,
            metadata::VersionCandidate,
            version::VersionSelector,
        },
        symbology::datamatrix::{DmSize, SIZES},
        DataMatrix, SymbolBuilder,
    };

    use super::base256_field;

    // (AI, fixed data length or None for variable)
    const AIS: [(&str, Option<usize>); 6] =
        [("01", Some(14)), ("17", Some(6)), ("3103", Some(6)), ("10", None), ("21", None), ("400", None)];

    pub fn element_strategy() -> BoxedStrategy<(usize, String)> {
        (0..AIS.len())
            .prop_flat_map(|k| {
                let pattern = match AIS[k].1 {
                    Some(n) => format!("[0-9]{{{n}}}"),
                    None => "[A-Za-z0-9]{1,20}".to_string(),
                };
                string_regex(&pattern).unwrap().prop_map(move |data| (k, data))
            })
            .boxed()
    }

    // Drops the FNC1 markers and puts brackets back at the recorded element
    // boundaries
    fn expand(reduced: &str, msg: &Gs1Message) -> String {
        let mut rest: String = reduced.chars().filter(|&c| c != '\x1d').collect();
        let mut res = String::new();
        for el in msg.elements() {
            let len = el.ai.len() + el.data_end - el.data_start;
            let (ai, data) = rest[..len].split_at(el.ai.len());
            res.push_str(&format!("[{ai}]{data}"));
            rest.drain(..len);
        }
        assert!(rest.is_empty(), "Trailing {rest:?}");
        res
    }

    proptest! {
        #[test]
        fn proptest_gs1_round_trip(elements in prop::collection::vec(element_strategy(), 1..6)) {
            let input: String = elements.iter().map(|(k, data)| format!("[{}]{data}", AIS[*k].0)).collect();

            let msg = Gs1Message::parse(&input).unwrap();
            let reduced = msg.reduce("\x1d");
            prop_assert!(!reduced.starts_with('\x1d'));
            prop_assert_eq!(expand(&reduced, &msg), input.clone());

            // FNC1 only ahead of variable-length prefixes
            let separators = reduced.matches('\x1d').count();
            let variable = elements.iter().skip(1).filter(|(k, _)| AIS[*k].1.is_none()).count();
            prop_assert_eq!(separators, variable);

            for el in msg.elements() {
                prop_assert_eq!(&input[el.data_start..el.data_end], el.data);
            }
        }

        #[test]
        fn proptest_rs_codeword_vanishes(
            data in prop::collection::vec(any::<u8>(), 1..200),
            ecc in 1usize..56,
        ) {
            for (gf, first_root) in [(GaloisField::qr(), 0), (GaloisField::data_matrix(), 1)] {
                let rs = ReedSolomon::with_first_root(gf, ecc, first_root);
                let mut codeword = data.clone();
                codeword.extend(rs.encode(&data[..]));
                prop_assert_eq!(codeword.len(), data.len() + ecc);
                prop_assert!(rs.syndromes(&codeword[..]).iter().all(|&s| s == 0));
            }
        }

        #[test]
        fn proptest_version_monotonic(len in 1usize..1600, prefix in 0usize..6) {
            let mut table: Vec<VersionCandidate> = SIZES.iter().map(DmSize::candidate).collect();
            table.sort_by_key(|c| c.data_capacity);
            let assemble = |_: &VersionCandidate| Ok(vec![0u16; len]);

            let auto = VersionSelector::new(&table).prefix(vec![0; prefix]).select(assemble);
            let Ok(auto) = auto else {
                prop_assert!(len + prefix > 1558);
                return Ok(());
            };
            for c in table.iter().filter(|c| c.data_capacity >= auto.candidate.data_capacity) {
                let fixed = VersionSelector::new(&table).preferred(Some(c.version)).prefix(vec![0; prefix]).select(assemble);
                prop_assert!(fixed.is_ok(), "Fits version {} but not {}", auto.candidate.version, c.version);
            }
        }

        #[test]
        fn proptest_append_plan(len in 0usize..2000, capacity in 1usize..200) {
            let payload: Vec<u32> = (0..len as u32).collect();
            let template = AppendTemplate {
                candidate: VersionCandidate::new(1, capacity + 5, 10),
                overhead: 5,
                max_segments: usize::MAX,
                message_ids: 1..=10,
            };

            let segments = plan(&payload, &template, Some(3)).unwrap();
            let total = len.div_ceil(capacity);
            prop_assert_eq!(segments.len(), total);
            for (i, seg) in segments.iter().enumerate() {
                prop_assert_eq!((seg.index, seg.total, seg.message_id), (i, total, Some(3)));
            }
            let joined: Vec<u32> = segments.iter().flat_map(|s| s.payload.iter().copied()).collect();
            prop_assert_eq!(joined, payload);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn proptest_sequence_round_trip(data in prop::collection::vec(any::<u8>(), 57..400)) {
            // 32x32 holds 62 data codewords: 4 header, 2 Base 256 and 56 payload
            let symbols = SymbolBuilder::from_bytes(DataMatrix::new(), &data).version(10).build_sequence().unwrap();
            prop_assert_eq!(symbols.len(), data.len().div_ceil(56));

            let mut joined = Vec::new();
            for (i, sym) in symbols.iter().enumerate() {
                let seg = sym.segment().unwrap();
                prop_assert_eq!((seg.index, seg.total), (i, symbols.len()));
                prop_assert_eq!((sym.width(), sym.height()), (32, 32));
                joined.extend(base256_field(sym.codewords().unwrap(), 4));
            }
            prop_assert_eq!(joined, data);
        }
    }
}

#[cfg(test)]
mod symbol_tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rayon::prelude::*;
    use test_case::test_case;

    use barcodism::{
        common::{
            append::{plan, AppendTemplate},
            gs1::reduce,
            metadata::VersionCandidate,
        },
        symbology::datamatrix::DmSize,
        DataMatrix, DataType, DmShape, ErrorKind, Gs1Error, SymbolBuilder, SymbolError,
    };

    use super::base256_field;

    fn template() -> AppendTemplate {
        AppendTemplate {
            candidate: VersionCandidate::new(12, 114, 48),
            overhead: 6,
            max_segments: 16,
            message_ids: 1..=64516,
        }
    }

    #[test_case("[01]06901236348338[10]batch666", "0106901236348338<FNC1>10batch666"; "gtin then batch")]
    #[test_case("[10]ABC[17]250101", "10ABC17250101"; "fixed prefix after variable")]
    #[test_case("[10]ABC[21]XYZ", "10ABC<FNC1>21XYZ"; "variable after variable")]
    fn test_gs1_reduce(input: &str, expected: &str) {
        assert_eq!(reduce(input, "<FNC1>").unwrap(), expected);
    }

    #[test]
    fn test_gs1_unknown_ai() {
        let err = reduce("[9999]1234", "<FNC1>").unwrap_err();
        assert_eq!(err, Gs1Error::UnknownAi("9999".into()));
        assert!(err.to_string().contains("unknown AI"));

        let mut builder = SymbolBuilder::new(DataMatrix::new(), "[9999]1234");
        builder.data_type(DataType::Gs1);
        assert_eq!(builder.build().unwrap_err().kind(), ErrorKind::InputValidation);
    }

    #[test_case(0, 0; "empty")]
    #[test_case(1, 1; "one")]
    #[test_case(108, 1; "exactly one segment")]
    #[test_case(109, 2; "one over")]
    #[test_case(324, 3; "three full")]
    #[test_case(325, 4; "three and one")]
    fn test_append_lengths(len: usize, total: usize) {
        let payload: Vec<u8> = (0..len).map(|i| (i * 7) as u8).collect();
        let segments = plan(&payload, &template(), None).unwrap();
        assert_eq!(segments.len(), total);
        assert!(segments.iter().all(|s| s.total == total));
        let joined: Vec<u8> = segments.iter().flat_map(|s| s.payload.to_vec()).collect();
        assert_eq!(joined, payload);
    }

    #[test]
    fn test_sequence_one_over_capacity() {
        // 14x14 leaves 2 payload bytes per symbol
        let mut builder = SymbolBuilder::new(DataMatrix::new(), "ABC");
        builder.version(3);
        let symbols = builder.build_sequence().unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(base256_field(symbols[0].codewords().unwrap(), 4), b"AB");
        assert_eq!(base256_field(symbols[1].codewords().unwrap(), 4), b"C");
    }

    #[test]
    fn test_sequence_of_nothing() {
        let mut builder = SymbolBuilder::new(DataMatrix::new(), "");
        builder.version(3);
        assert!(builder.build_sequence().unwrap().is_empty());
    }

    #[test]
    fn test_preferred_version_too_small() {
        let mut builder = SymbolBuilder::new(DataMatrix::new(), "ABCDEFGHIJ");
        builder.version(2);
        let err = builder.build().unwrap_err();
        assert_eq!(err, SymbolError::DataTooLongForVersion(2));
        assert_eq!(err.kind(), ErrorKind::Capacity);

        builder.unset_version();
        assert_eq!(builder.build().unwrap().version(), 4);
    }

    #[test]
    fn test_data_too_long() {
        let data = "A".repeat(1600);
        let err = SymbolBuilder::new(DataMatrix::new(), &data).build().unwrap_err();
        assert_eq!(err, SymbolError::DataTooLong);
    }

    #[test_case(DmShape::Square)]
    #[test_case(DmShape::Rectangle)]
    #[test_case(DmShape::Any)]
    fn test_seeded_payloads(shape: DmShape) {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let len = rng.random_range(1..=40);
            let text: String = (0..len).map(|_| rng.random_range(b' '..=b'~') as char).collect();

            let sym = SymbolBuilder::new(DataMatrix::new().shape(shape), &text).build().unwrap();
            let size = DmSize::by_id(sym.version()).unwrap();
            assert_eq!(sym.codewords().unwrap().len(), size.data + size.ecc);
            assert_eq!((sym.width(), sym.height()), (size.cols, size.rows));
            match shape {
                DmShape::Square => assert!(size.is_square()),
                DmShape::Rectangle => assert!(!size.is_square()),
                DmShape::Any => (),
            }

            let img = sym.render(2);
            assert_eq!(img.dimensions(), (2 * (size.cols as u32 + 2), 2 * (size.rows as u32 + 2)));
        }
    }

    #[test]
    fn test_parallel_batch() {
        let mut rng = StdRng::seed_from_u64(42);
        let payloads: Vec<Vec<u8>> =
            (0..64).map(|_| (0..rng.random_range(1..300)).map(|_| rng.random::<u8>()).collect()).collect();

        let encode = |data: &Vec<u8>| SymbolBuilder::from_bytes(DataMatrix::new(), data).build().unwrap();
        let sequential: Vec<_> = payloads.iter().map(encode).collect();
        let parallel: Vec<_> = payloads.par_iter().map(encode).collect();
        assert_eq!(sequential, parallel);
    }
}
