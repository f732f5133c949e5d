//! Random selection & placement of new food
use super::board::{Board, Point};
use super::food::{Food, FoodKind};
use super::snake::Snake;
use crate::consts;
use rand::Rng;

/// Pick the kind of a new food item at random, weighted by each kind's
/// [`chance`][super::food::FoodSpec::chance]
pub(crate) fn choose_food_type<R: Rng>(rng: &mut R) -> FoodKind {
    kind_for_draw(rng.random_range(1..=100))
}

/// Walk the food table accumulating chances and return the first kind whose
/// cumulative chance is at least `draw` (which should be in `1..=100`)
fn kind_for_draw(draw: u32) -> FoodKind {
    let mut cumulative = 0;
    for kind in FoodKind::iter() {
        cumulative += kind.spec().chance;
        if draw <= cumulative {
            return kind;
        }
    }
    FoodKind::Normal
}

/// Choose a grid-aligned position for a new food item, avoiding the snake and
/// the food already on the board.  If no free position is found within
/// [`PLACEMENT_ATTEMPTS`][consts::PLACEMENT_ATTEMPTS] tries, a fresh random
/// position is returned regardless of what occupies it.
pub(crate) fn place_food<R: Rng>(
    rng: &mut R,
    board: Board,
    snake: &Snake,
    foods: &[Food],
) -> Point {
    for _ in 0..consts::PLACEMENT_ATTEMPTS {
        let p = random_cell(rng, board);
        if !snake.occupies(p) && foods.iter().all(|f| f.pos() != p) {
            return p;
        }
    }
    random_cell(rng, board)
}

fn random_cell<R: Rng>(rng: &mut R, board: Board) -> Point {
    let (cols, rows) = board.spawn_grid();
    let cell = board.cell_size();
    Point::new(
        rng.random_range(0..cols) * cell,
        rng.random_range(0..rows) * cell,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use enum_map::EnumMap;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[rstest]
    #[case(1, FoodKind::Normal)]
    #[case(70, FoodKind::Normal)]
    #[case(71, FoodKind::Gold)]
    #[case(80, FoodKind::Gold)]
    #[case(81, FoodKind::Speed)]
    #[case(90, FoodKind::Speed)]
    #[case(91, FoodKind::Slow)]
    #[case(100, FoodKind::Slow)]
    fn test_kind_for_draw(#[case] draw: u32, #[case] kind: FoodKind) {
        assert_eq!(kind_for_draw(draw), kind);
    }

    #[test]
    fn kind_distribution() {
        const DRAWS: u32 = 20_000;
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let mut counts = EnumMap::<FoodKind, u32>::default();
        for _ in 0..DRAWS {
            counts[choose_food_type(&mut rng)] += 1;
        }
        for (kind, &n) in &counts {
            let expected = DRAWS * kind.spec().chance / 100;
            assert!(
                n.abs_diff(expected) < DRAWS / 50,
                "{kind:?}: drew {n}, expected about {expected}"
            );
        }
    }

    #[test]
    fn placement_is_grid_aligned_and_in_spawn_area() {
        let board = Board::default();
        let snake = Snake::new(board.center());
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..500 {
            let p = place_food(&mut rng, board, &snake, &[]);
            assert_eq!(p.x % 20, 0);
            assert_eq!(p.y % 20, 0);
            assert!((0..740).contains(&p.x), "x = {}", p.x);
            assert!((0..380).contains(&p.y), "y = {}", p.y);
        }
    }

    #[test]
    fn placement_avoids_snake_and_food() {
        // A 6×4 board has a 5×3 spawn area; cover the top row with the snake
        // and put food in two more cells.
        let board = Board::new(120, 80, 20).unwrap();
        let mut snake = Snake::new(Point::new(80, 0));
        snake.body = (0..5).map(|x| Point::new(x * 20, 0)).collect::<VecDeque<_>>();
        snake.max_len = snake.body.len();
        let foods = [
            Food::new(Point::new(0, 40), FoodKind::Normal),
            Food::new(Point::new(20, 40), FoodKind::Gold),
        ];
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        for _ in 0..200 {
            let p = place_food(&mut rng, board, &snake, &foods);
            assert!(!snake.occupies(p), "placed food on snake at {p:?}");
            assert!(
                foods.iter().all(|f| f.pos() != p),
                "placed food on food at {p:?}"
            );
        }
    }

    #[test]
    fn placement_falls_back_when_full() {
        let board = Board::new(60, 60, 20).unwrap();
        let mut snake = Snake::new(Point::new(0, 0));
        snake.body = VecDeque::from([
            Point::new(0, 0),
            Point::new(20, 0),
            Point::new(20, 20),
            Point::new(0, 20),
        ]);
        snake.max_len = 4;
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let p = place_food(&mut rng, board, &snake, &[]);
        assert!(snake.occupies(p));
    }
}
