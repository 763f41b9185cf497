use collision_tables::{
    hash::{DoubleHashSecondary, Modulo},
    AnyTable, ChainedTable, DoubleHashingTable, Error, GapStats, HashKind, HashTable,
    LinearProbingTable, Strategy,
};
use test_log::test;

#[test]
fn chaining_scenario_m7() -> collision_tables::Result<()> {
    let mut table = ChainedTable::new(Modulo::new(7)?, 4)?;

    for key in [10, 17, 24, 3] {
        table.insert(key)?;
    }

    assert_eq!([4, 0, 0], table.top_chain_lengths());
    assert_eq!(6, table.collisions());
    assert_eq!(1, table.occupied_slots());
    assert_eq!(GapStats::default(), table.bucket_gap_stats());

    Ok(())
}

#[test]
fn chaining_same_bucket_is_triangular() -> collision_tables::Result<()> {
    for n in [1_u64, 2, 5, 64, 300] {
        let mut table = ChainedTable::new(Modulo::new(13)?, n as usize)?;

        for i in 0..n {
            table.insert(i32::try_from(i * 13).expect("should fit"))?;
        }

        assert_eq!(n * (n - 1) / 2, table.collisions());
    }

    Ok(())
}

#[test]
fn clear_metrics_always_zero() -> collision_tables::Result<()> {
    for strategy in Strategy::ALL {
        let mut table = AnyTable::build(strategy, HashKind::Mod, 31, 20)?;

        table.clear_metrics();
        assert_eq!(0, table.collisions());

        for key in 0..20 {
            table.insert(key * 31)?;
        }
        assert!(table.collisions() > 0);

        table.clear_metrics();
        assert_eq!(0, table.collisions());
        assert_eq!(20, table.len());
    }

    Ok(())
}

#[test]
fn linear_probing_full_m3() -> collision_tables::Result<()> {
    let mut table = LinearProbingTable::new(Modulo::new(3)?);

    for key in [5, 8, 11] {
        table.insert(key)?;
    }

    assert!(matches!(table.insert(14), Err(Error::TableFull(3))));
    assert!(matches!(table.insert(0), Err(Error::TableFull(3))));
    assert_eq!(3, table.len());

    Ok(())
}

#[test]
fn double_hashing_full_prime_table() -> collision_tables::Result<()> {
    let mut table = DoubleHashingTable::new(Modulo::new(5)?, DoubleHashSecondary::new(5)?)?;

    for key in [0, 5, 10, 15, 20] {
        table.insert(key)?;
    }

    assert!(matches!(table.insert(25), Err(Error::TableFull(5))));
    assert_eq!(vec![0, 1, 2, 3, 4], table.occupied_indices());

    Ok(())
}

#[test]
fn gap_stats_single_slot_all_strategies() -> collision_tables::Result<()> {
    for strategy in Strategy::ALL {
        let mut table = AnyTable::build(strategy, HashKind::Mul, 17, 1)?;
        table.insert(123_456_789)?;

        let stats = table.gap_stats();
        assert_eq!(0, stats.min);
        assert!(stats.avg.abs() < f64::EPSILON);
        assert_eq!(0, stats.max);
    }

    Ok(())
}

#[test]
fn gap_stats_open_addressing_wraps_chaining_does_not() -> collision_tables::Result<()> {
    // slots/buckets 2 and 5 in an array of 10
    let keys = [2, 5];

    let mut chained = AnyTable::build(Strategy::Chaining, HashKind::Mod, 10, 2)?;
    let mut linear = AnyTable::build(Strategy::LinearProbing, HashKind::Mod, 10, 2)?;

    for key in keys {
        chained.insert(key)?;
        linear.insert(key)?;
    }

    // one gap of 2
    let stats = chained.gap_stats();
    assert_eq!((2, 2), (stats.min, stats.max));

    // gap 2 and wrap gap (10 - 1 - 5) + 2 = 6
    let stats = linear.gap_stats();
    assert_eq!((2, 6), (stats.min, stats.max));
    assert!((stats.avg - 4.0).abs() < f64::EPSILON);

    Ok(())
}

#[test]
fn open_addressing_has_no_chains() -> collision_tables::Result<()> {
    for strategy in [Strategy::LinearProbing, Strategy::DoubleHashing] {
        let mut table = AnyTable::build(strategy, HashKind::Mod, 7, 3)?;

        for key in [0, 7, 14] {
            table.insert(key)?;
        }

        assert_eq!([0, 0, 0], table.top_chain_lengths());
        assert_eq!(3, table.occupied_slots());
    }

    Ok(())
}

#[test]
fn failed_insert_keeps_metrics() -> collision_tables::Result<()> {
    let mut table = LinearProbingTable::new(Modulo::new(4)?);

    for key in [0, 4, 8, 12] {
        table.insert(key)?;
    }
    let collisions = table.collisions();

    assert!(table.insert(16).is_err());
    assert_eq!(collisions, table.collisions());
    assert!(!table.contains(16));

    Ok(())
}
