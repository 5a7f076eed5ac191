use tilelife::{FrameBudget, Layout, NiceInt, Pattern, Simulation, WallClockCounter};

/// One 60 Hz frame in nanoseconds, the budget a step has to fit into.
const FRAME_NANOS: u64 = 16_666_667;

const GLIDER_GUN: &[u8] = b"x = 36, y = 9, rule = B3/S23\n\
24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$2o8bo5bo3b2o$2o8bo3bob2o4b\
obo$10bo5bo7bo$11bo3bo$12b2o!";

fn main() {
    let mut args = std::env::args().skip(1);
    let steps: u64 = args
        .next()
        .map(|s| s.parse().expect("steps must be a number"))
        .unwrap_or(600);
    let seed_gun = args.next().as_deref() == Some("gun");

    let layout = Layout::new(256, 160).unwrap();
    let mut sim = Simulation::new(layout);
    if seed_gun {
        let gun = Pattern::from_rle(GLIDER_GUN).unwrap();
        sim.reset_to(&gun).unwrap();
    } else {
        sim.reset_random();
    }
    println!(
        "{}x{} cells, {} generations, seeded {}",
        layout.cols(),
        layout.rows(),
        steps,
        if seed_gun { "from the gun" } else { "randomly" },
    );

    let budget = FrameBudget::new(FRAME_NANOS);
    let mut counter = WallClockCounter::new();
    let (mut total, mut worst) = (0u64, 0u64);
    for _ in 0..steps {
        let elapsed = sim.step_timed(&mut counter).unwrap();
        total += elapsed;
        worst = worst.max(elapsed);
    }

    let mean = total / steps.max(1);
    println!("population after run: {}", NiceInt::from(sim.current().population() as u64));
    println!("total: {} ns", NiceInt::from(total));
    println!(
        "mean step: {} ns ({:.2}% of a {} ns frame, {:?})",
        NiceInt::from(mean),
        budget.fraction(mean) * 100.0,
        NiceInt::from(budget.units()),
        budget.band(mean),
    );
    println!(
        "worst step: {} ns ({:.2}% of frame, {:?})",
        NiceInt::from(worst),
        budget.fraction(worst) * 100.0,
        budget.band(worst),
    );
}
