use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use webtrek::models::entity::Star;
use webtrek::models::galaxy::{Galaxy, GenerationPlan};
use webtrek::models::position::Cell;
use webtrek::models::quadrant::Quadrant;
use webtrek::models::sector::Sector;
use webtrek::services::geometry::{clip_path, trace_line};

proptest! {
    /// Property: tracing a cell to itself yields exactly that cell
    #[test]
    fn degenerate_trace_is_identity(x in 0i32..8, y in 0i32..8) {
        prop_assert_eq!(trace_line(x, y, x, y), vec![Cell::new(x, y)]);
    }

    /// Property: every trace contains both endpoints and is 8-connected
    #[test]
    fn traces_are_eight_connected(
        x0 in 0i32..8, y0 in 0i32..8,
        x1 in 0i32..8, y1 in 0i32..8,
    ) {
        let path = trace_line(x0, y0, x1, y1);

        prop_assert_eq!(path[0], Cell::new(x0, y0));
        prop_assert_eq!(*path.last().unwrap(), Cell::new(x1, y1));
        for pair in path.windows(2) {
            prop_assert!((pair[1].x - pair[0].x).abs() <= 1);
            prop_assert!((pair[1].y - pair[0].y).abs() <= 1);
            prop_assert!(pair[0] != pair[1]);
        }
    }

    /// Property: trace length is one more than the chebyshev distance
    #[test]
    fn trace_length_matches_chebyshev_distance(
        x0 in 0i32..8, y0 in 0i32..8,
        x1 in 0i32..8, y1 in 0i32..8,
    ) {
        let path = trace_line(x0, y0, x1, y1);
        let chebyshev = (x1 - x0).abs().max((y1 - y0).abs());
        prop_assert_eq!(path.len() as i32, chebyshev + 1);
    }

    /// Property: identical endpoints always yield identical paths
    #[test]
    fn traces_are_deterministic(
        x0 in 0i32..8, y0 in 0i32..8,
        x1 in 0i32..8, y1 in 0i32..8,
    ) {
        prop_assert_eq!(trace_line(x0, y0, x1, y1), trace_line(x0, y0, x1, y1));
    }

    /// Property: a clipped path never passes through an occupied cell,
    /// except for its final cell
    #[test]
    fn clip_stops_at_first_occupant(
        seed in any::<u64>(),
        x1 in 0i32..8, y1 in 0i32..8,
        star_x in 0i32..8, star_y in 0i32..8,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let quadrant = Quadrant::new();
        let mut sector = Sector::load_from_quadrant(&quadrant, &mut rng);
        sector.stars.push(Star::new(Cell::new(star_x, star_y)));

        let path = trace_line(0, 0, x1, y1);
        let clipped = clip_path(&sector, &path);

        prop_assert!(!clipped.is_empty());
        prop_assert!(clipped.len() <= path.len());
        for &cell in &clipped[..clipped.len() - 1] {
            prop_assert!(sector.occupant_at(cell).is_none());
        }
    }

    /// Property: generation places exact totals and honors caps
    #[test]
    fn generation_totals_and_caps(
        seed in any::<u64>(),
        stars in 0u32..100,
        bases in 0u32..16,
        enemies in 0u32..24,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = GenerationPlan {
            stars,
            bases,
            enemies,
            star_cap: 7,
            base_cap: 2,
            enemy_cap: 3,
        };
        let galaxy = Galaxy::generate(&mut rng, &plan);

        let mut star_total = 0;
        let mut base_total = 0;
        let mut enemy_total = 0;
        for (_, q) in galaxy.quadrants() {
            prop_assert!(q.stars.len() <= 7);
            prop_assert!(q.bases.len() <= 2);
            prop_assert!(q.enemies.len() <= 3);
            star_total += q.stars.len() as u32;
            base_total += q.bases.len() as u32;
            enemy_total += q.enemies.len() as u32;
        }
        prop_assert_eq!(star_total, stars);
        prop_assert_eq!(base_total, bases);
        prop_assert_eq!(enemy_total, enemies);
    }

    /// Property: the free-cell search never returns an occupied cell
    #[test]
    fn free_cells_are_actually_free(seed in any::<u64>(), fill in 0usize..40) {
        let mut rng = StdRng::seed_from_u64(seed);
        let quadrant = Quadrant::new();
        let mut sector = Sector::load_from_quadrant(&quadrant, &mut rng);

        // Pack the sector with stars at distinct cells.
        let mut placed = 0;
        'outer: for y in 0..8 {
            for x in 0..8 {
                if placed >= fill {
                    break 'outer;
                }
                let cell = Cell::new(x, y);
                if sector.occupant_at(cell).is_none() {
                    sector.stars.push(Star::new(cell));
                    placed += 1;
                }
            }
        }

        let free = sector.find_free_cell(&mut rng);
        prop_assert!(sector.occupant_at(free).is_none());
        prop_assert!((0..8).contains(&free.x) && (0..8).contains(&free.y));
    }

    /// Property: a loaded sector mirrors its quadrant exactly and spawns
    /// the ship on a free cell
    #[test]
    fn loaded_sector_mirrors_quadrant(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let plan = GenerationPlan {
            stars: 50,
            bases: 8,
            enemies: 12,
            star_cap: 7,
            base_cap: 2,
            enemy_cap: 3,
        };
        let galaxy = Galaxy::generate(&mut rng, &plan);

        for (pos, quadrant) in galaxy.quadrants() {
            let sector = Sector::load_from_quadrant(quadrant, &mut rng);
            prop_assert_eq!(sector.stars.len(), quadrant.stars.len(), "quadrant {:?}", pos);
            prop_assert_eq!(sector.bases.len(), quadrant.bases.len());
            prop_assert_eq!(sector.enemies.len(), quadrant.enemies.len());
            prop_assert!(!quadrant.cell_occupied(sector.ship.cell));
        }
    }
}
