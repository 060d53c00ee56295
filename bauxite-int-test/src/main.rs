use std::time::Instant;

use bauxite::{Point, RTree, Rectangle, SpatialIndex, SpatialResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() -> SpatialResult<()> {
    println!("Starting R-tree stress run...");
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let count = 100_000;

    let mut records = Vec::with_capacity(count);
    for index in 0..count {
        let point = Point::new(vec![
            rng.gen_range(0.0..1000.0),
            rng.gen_range(0.0..1000.0),
        ]);
        records.push((Rectangle::from_point(&point), index as u64));
    }

    let mut tree = RTree::new(30, 12)?;
    let start = Instant::now();
    for (rectangle, id) in &records {
        tree.insert(rectangle, *id)?;
    }
    println!("Inserted {} records in {:?}", count, start.elapsed());
    println!("Stats after build: {:?}", tree.stats());

    let queries = 1_000;
    let start = Instant::now();
    let mut hits = 0usize;
    for _ in 0..queries {
        let x = rng.gen_range(0.0..900.0);
        let y = rng.gen_range(0.0..900.0);
        let window = Rectangle::from_min_max(vec![x, y], vec![x + 100.0, y + 100.0]);
        hits += tree.intersecting(&window)?.len();
    }
    println!(
        "Ran {} window queries in {:?} ({} records matched)",
        queries,
        start.elapsed(),
        hits
    );

    let start = Instant::now();
    for _ in 0..queries {
        let point = Point::new(vec![
            rng.gen_range(0.0..1000.0),
            rng.gen_range(0.0..1000.0),
        ]);
        tree.k_nearest(&point, 10)?;
    }
    println!("Ran {} k-nearest queries in {:?}", queries, start.elapsed());

    let start = Instant::now();
    for (rectangle, id) in &records {
        tree.remove(rectangle, id)?;
    }
    println!("Removed all records in {:?}", start.elapsed());
    println!("Final stats: {:?}", tree.stats());

    Ok(())
}
