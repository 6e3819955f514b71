use super::*;

#[test]
fn fnv_split_writes_hash_alike() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"adgraph");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'a');
    b.write_bytes(b"dgraph");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn fnv_str_is_length_prefixed() {
    let mut a = Fnv1a64::new_default();
    a.write_str("ab");
    a.write_str("c");
    let mut b = Fnv1a64::new_default();
    b.write_str("a");
    b.write_str("bc");
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn splitmix_is_reproducible_per_seed() {
    let mut a = SplitMix64::new(7);
    let mut b = SplitMix64::new(7);
    let mut c = SplitMix64::new(8);
    let xs: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
    let ys: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
    let zs: Vec<u64> = (0..4).map(|_| c.next_u64()).collect();
    assert_eq!(xs, ys);
    assert_ne!(xs, zs);
}

#[test]
fn next_index_stays_in_bounds() {
    let mut rng = SplitMix64::new(42);
    for _ in 0..256 {
        assert!(rng.next_index(5) < 5);
    }
}
