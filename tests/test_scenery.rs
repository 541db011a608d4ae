use rand::rngs::StdRng;
use rand::SeedableRng;

use archery::scenery::*;

fn backdrop(width: u16, height: u16, seed: u64) -> Backdrop {
    Backdrop::generate(width, height, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn base_colours() {
    assert_eq!(Shade::Sky(0).rgb(), (80, 80, 200));
    assert_eq!(Shade::Sky(SKY_STRIPES - 1).rgb(), (175, 175, 235));
    assert_eq!(Shade::Grass(0).rgb(), (70, 200, 70));
    assert_eq!(Shade::Grass(1).rgb(), (49, 140, 49));
}

#[test]
fn grass_gets_darker() {
    let mut last = Shade::Grass(0).rgb();
    for steps in 1..6 {
        let next = Shade::Grass(steps).rgb();
        assert!(next.1 < last.1);
        last = next;
    }
}

#[test]
fn sky_on_top_grass_below() {
    let b = backdrop(40, 20, 7);
    for row in 0..20 {
        let cells = b.row(row);
        assert_eq!(cells.len(), 40);
        for shade in cells {
            match shade {
                Shade::Sky(_) => assert!(row < 10, "sky at row {row}"),
                Shade::Grass(_) => assert!(row >= 10, "grass at row {row}"),
            }
        }
    }
}

#[test]
fn sky_stripes_lighten_downwards() {
    let b = backdrop(10, 40, 1);
    let mut last = 0;
    for row in 0..20 {
        let Some(Shade::Sky(stripe)) = b.shade(0, row) else {
            panic!("row {row} is not sky");
        };
        assert!(stripe >= last);
        assert!(stripe < SKY_STRIPES);
        last = stripe;
    }
    assert_eq!(last, SKY_STRIPES - 1);
}

#[test]
fn dark_runs_grow_one_step_or_reset() {
    let b = backdrop(30, 30, 42);
    let mut prev = 0u8;
    for col in 0..30 {
        for row in 15..30 {
            let Some(Shade::Grass(run)) = b.shade(col, row) else {
                panic!("({col}, {row}) is not grass");
            };
            assert!(run == 0 || run == prev.saturating_add(1), "run {prev} -> {run}");
            prev = run;
        }
    }
}

#[test]
fn first_grass_cell_is_darkened() {
    let b = backdrop(5, 10, 3);
    assert_eq!(b.shade(0, 5), Some(Shade::Grass(1)));
}

#[test]
fn same_seed_same_backdrop() {
    let a = backdrop(25, 12, 99);
    let b = backdrop(25, 12, 99);
    for row in 0..12 {
        assert_eq!(a.row(row), b.row(row));
    }
}

#[test]
fn out_of_range_cells() {
    let b = backdrop(8, 6, 0);
    assert_eq!(b.shade(8, 0), None);
    assert_eq!(b.shade(0, 6), None);
    assert!(b.row(6).is_empty());
}

#[test]
fn empty_screen() {
    let b = backdrop(0, 0, 0);
    assert!(b.row(0).is_empty());
    assert_eq!(b.shade(0, 0), None);
}
