use super::*;

fn stack() -> Vec<Material> {
    vec![Material::Steel1084, Material::Steel15N20, Material::Steel1084]
}

#[test]
fn unchanged_key_returns_shared_raster() {
    let mut cache = PatternCache::default();
    let ops = vec![Operation::Twist { turns: 1.0 }];
    let a = cache.get(&stack(), &ops, 16, 16);
    let b = cache.get(&stack(), &ops, 16, 16);
    assert!(a.ptr_eq(&b));
    assert_eq!(
        cache.stats(),
        PatternCacheStats {
            hits: 1,
            misses: 1
        }
    );
}

#[test]
fn any_key_change_recomputes() {
    let mut cache = PatternCache::default();
    let ops = vec![Operation::Fold { times: 1 }];
    let base = cache.get(&stack(), &ops, 16, 16);

    let other_ops = vec![Operation::Fold { times: 2 }];
    let changed_ops = cache.get(&stack(), &other_ops, 16, 16);
    assert!(!base.ptr_eq(&changed_ops));
    assert_eq!(changed_ops, synthesize_with(&stack(), &other_ops, 16, 16, &SynthOpts::default()));

    let mut other_stack = stack();
    other_stack.push(Material::Nickel200);
    let changed_stack = cache.get(&other_stack, &other_ops, 16, 16);
    assert!(!changed_stack.ptr_eq(&changed_ops));

    let resized = cache.get(&other_stack, &other_ops, 16, 17);
    assert_eq!(resized.height(), 17);
    assert_eq!(cache.stats().misses, 4);
    assert_eq!(cache.stats().hits, 0);
}

#[test]
fn going_back_to_an_old_key_is_not_stale() {
    let mut cache = PatternCache::default();
    let a_ops = vec![Operation::Stretch { factor: 2.0 }, Operation::WFolds { folds: 3 }];
    let b_ops = vec![Operation::WFolds { folds: 3 }, Operation::Stretch { factor: 2.0 }];
    let a = cache.get(&stack(), &a_ops, 24, 24);
    let _b = cache.get(&stack(), &b_ops, 24, 24);
    let a_again = cache.get(&stack(), &a_ops, 24, 24);
    assert_eq!(a, a_again);
}

#[test]
fn clear_forces_recompute() {
    let mut cache = PatternCache::default();
    let a = cache.get(&stack(), &[], 8, 8);
    cache.clear();
    let b = cache.get(&stack(), &[], 8, 8);
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
}

#[test]
fn fingerprint_distinguishes_op_order_and_values() {
    let c = Canvas {
        width: 8,
        height: 8,
    };
    let a = fingerprint_inputs(&stack(), &[Operation::Twist { turns: 1.0 }], c);
    let b = fingerprint_inputs(&stack(), &[Operation::Twist { turns: 1.5 }], c);
    let a2 = fingerprint_inputs(&stack(), &[Operation::Twist { turns: 1.0 }], c);
    assert_ne!(a, b);
    assert_eq!(a, a2);
}
