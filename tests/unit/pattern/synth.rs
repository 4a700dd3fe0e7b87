use super::*;

fn alternating(pairs: usize) -> Vec<Material> {
    (0..pairs)
        .flat_map(|_| [Material::Steel1084, Material::Steel15N20])
        .collect()
}

fn count_runs<T: PartialEq>(values: impl IntoIterator<Item = T>) -> usize {
    let mut runs = 0;
    let mut last: Option<T> = None;
    for v in values {
        if last.as_ref() != Some(&v) {
            runs += 1;
            last = Some(v);
        }
    }
    runs
}

#[test]
fn empty_ops_reduce_to_stack_banding() {
    let stack = vec![
        Material::Steel1084,
        Material::Steel15N20,
        Material::O1,
        Material::Nickel200,
        Material::Steel1095,
    ];
    let (w, h) = (7u32, 23u32);
    let r = synthesize(&stack, &[], w, h);
    for y in 0..h {
        let expected = ((f64::from(y) / f64::from(h)) % 1.0 * stack.len() as f64).floor() as usize;
        let g = stack[expected].etch_byte();
        for x in 0..w {
            assert_eq!(r.pixel(x, y), Some([g, g, g, 255]), "x={x} y={y}");
        }
    }
}

#[test]
fn empty_stack_is_background_for_any_ops() {
    let ops = vec![
        Operation::Twist { turns: 3.0 },
        Operation::Fold { times: 4 },
        Operation::Raindrops {
            radius: 0.1,
            spacing: 0.2,
        },
    ];
    for ops in [&[][..], &ops[..]] {
        let r = synthesize(&[], ops, 16, 8);
        assert_eq!((r.width(), r.height()), (16, 8));
        assert_eq!(r, PatternRaster::filled(r.canvas(), BACKGROUND));
    }
}

#[test]
fn synthesize_is_deterministic() {
    let stack = alternating(6);
    let ops = vec![
        Operation::Twist { turns: 2.0 },
        Operation::Ladder {
            spacing: 0.125,
            depth: 0.6,
        },
        Operation::WFolds { folds: 3 },
        Operation::Stretch { factor: 1.5 },
    ];
    let a = synthesize(&stack, &ops, 48, 40);
    let b = synthesize(&stack, &ops, 48, 40);
    assert_eq!(a.data(), b.data());
}

#[test]
fn parallel_and_sequential_paths_match() {
    let stack = alternating(9);
    let ops = vec![
        Operation::Raindrops {
            radius: 0.07,
            spacing: 0.18,
        },
        Operation::Twist { turns: 1.25 },
    ];
    let seq = synthesize_with(
        &stack,
        &ops,
        64,
        48,
        &SynthOpts {
            parallel_min_pixels: usize::MAX,
        },
    );
    let par = synthesize_with(
        &stack,
        &ops,
        64,
        48,
        &SynthOpts {
            parallel_min_pixels: 0,
        },
    );
    assert_eq!(seq.data(), par.data());
}

#[test]
fn every_pixel_is_opaque_gray_from_the_stack() {
    let stack = vec![Material::Steel5160, Material::Stainless304, Material::W2];
    let allowed: Vec<u8> = stack.iter().map(|m| m.etch_byte()).collect();
    let ops = vec![
        Operation::Ladder {
            spacing: 0.1,
            depth: 2.0,
        },
        Operation::Fold { times: 3 },
    ];
    let r = synthesize(&stack, &ops, 32, 32);
    for px in r.data().chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
        assert!(allowed.contains(&px[0]));
    }
}

#[test]
fn fold_twice_over_ten_layers_gives_forty_bands() {
    let stack = alternating(5);
    let ops = vec![Operation::Fold { times: 2 }];

    // Raster rows follow floor(frac(4v) * 10).
    let r = synthesize(&stack, &ops, 64, 32);
    for y in 0..32u32 {
        let v = f64::from(y) / 32.0;
        let idx = ((v * 4.0) % 1.0 * 10.0).floor() as usize;
        let g = stack[idx].etch_byte();
        assert_eq!(r.pixel(17, y), Some([g, g, g, 255]), "y={y}");
    }

    // Sampled finely along a vertical line, the layer index shows 40 bands.
    let samples = 4000;
    for u in [0.0, 0.37, 0.9] {
        let runs = count_runs(
            (0..samples)
                .map(|i| layer_index_at(stack.len(), &ops, u, f64::from(i) / f64::from(samples)))
                .inspect(|idx| assert!(idx.is_some())),
        );
        assert_eq!(runs, 40, "u={u}");
    }

    // At a resolution that resolves every band, the gray alternates 40 times down a column.
    let tall = synthesize(&stack, &ops, 4, 320);
    let column = (0..320).map(|y| usize::from(tall.pixel(2, y).unwrap()[0]));
    assert_eq!(count_runs(column), 40);
}

#[test]
fn layer_index_at_is_none_for_empty_stack() {
    assert_eq!(layer_index_at(0, &[], 0.5, 0.5), None);
    assert_eq!(layer_index_at(4, &[], 0.1, 0.5), Some(2));
}

#[test]
fn add_sheets_has_no_raster_effect() {
    let stack = alternating(3);
    let plain = synthesize(&stack, &[], 20, 20);
    let with_history = synthesize(
        &stack,
        &[Operation::AddSheets {
            material: Material::Steel1084,
            count: 3,
        }],
        20,
        20,
    );
    assert_eq!(plain.data(), with_history.data());
}

#[test]
fn zero_sized_request_yields_empty_image() {
    let r = synthesize(&alternating(2), &[], 0, 5);
    assert_eq!(r.width(), 0);
    assert!(r.data().is_empty());
}
