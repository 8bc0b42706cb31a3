mod common;

use crucible_lib::{
    backtracking_search, cross_validate, frontier_search, minimum_cost, solve, CostGrid, Error,
    LowerBoundTable, RunConstraints, SearchStrategy, SolveRequest,
};

use common::{example_grid, fixture_grid};

#[test]
fn example_normal_costs_102() {
    let grid = example_grid();
    assert_eq!(minimum_cost(&grid, &RunConstraints::normal()).unwrap(), 102);
}

#[test]
fn example_ultra_costs_94() {
    let grid = example_grid();
    assert_eq!(minimum_cost(&grid, &RunConstraints::ultra()).unwrap(), 94);
}

#[test]
fn corridor_costs_71_ultra_and_59_normal() {
    let grid = fixture_grid("corridor.txt");
    assert_eq!(minimum_cost(&grid, &RunConstraints::ultra()).unwrap(), 71);
    assert_eq!(minimum_cost(&grid, &RunConstraints::normal()).unwrap(), 59);
}

#[test]
fn both_engines_agree_on_the_example() {
    let grid = example_grid();
    for constraints in [RunConstraints::normal(), RunConstraints::ultra()] {
        let (primary, check) = cross_validate(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &constraints,
        )
        .expect("engines agree");
        assert_eq!(primary.cost, check.cost);
    }
}

#[test]
fn verified_backtracking_solve_on_example() {
    let grid = example_grid();
    let request = SolveRequest::corners(&grid, RunConstraints::ultra())
        .with_strategy(SearchStrategy::Backtracking)
        .with_verification();
    let solution = solve(&grid, &request).unwrap();
    assert_eq!(solution.cost(), 94);
    assert_eq!(solution.verified_by, Some(SearchStrategy::Frontier));
}

#[test]
fn single_cell_grid_costs_nothing_for_any_constraints() {
    let grid: CostGrid = "8".parse().unwrap();
    let table = LowerBoundTable::build(&grid, grid.bottom_right()).unwrap();
    for constraints in [
        RunConstraints::normal(),
        RunConstraints::ultra(),
        RunConstraints::new(7, 7).unwrap(),
    ] {
        let primary =
            frontier_search(&grid, grid.top_left(), grid.bottom_right(), &constraints).unwrap();
        let check = backtracking_search(
            &grid,
            grid.top_left(),
            grid.bottom_right(),
            &constraints,
            &table,
        )
        .unwrap();
        assert_eq!(primary.cost, 0);
        assert_eq!(check.cost, 0);
    }
}

#[test]
fn short_grid_with_long_minimum_run_is_unreachable() {
    let grid = fixture_grid("unreachable_ultra.txt");
    let constraints = RunConstraints::new(4, 10).unwrap();
    let table = LowerBoundTable::build(&grid, grid.bottom_right()).unwrap();

    let primary = frontier_search(&grid, grid.top_left(), grid.bottom_right(), &constraints);
    assert!(matches!(primary, Err(Error::UnreachableTarget { .. })));

    let check = backtracking_search(
        &grid,
        grid.top_left(),
        grid.bottom_right(),
        &constraints,
        &table,
    );
    assert!(matches!(check, Err(Error::UnreachableTarget { .. })));

    let err = minimum_cost(&grid, &constraints).expect_err("unreachable");
    assert!(format!("{err}").contains("no legal path from (0, 0) to (0, 1)"));
}

#[test]
fn example_path_is_legal_and_sums_to_cost() {
    let grid = example_grid();
    let constraints = RunConstraints::ultra();
    let outcome =
        frontier_search(&grid, grid.top_left(), grid.bottom_right(), &constraints).unwrap();

    let cells = outcome.cells();
    assert_eq!(cells.first(), Some(&grid.top_left()));
    assert_eq!(cells.last(), Some(&grid.bottom_right()));

    let total: u32 = cells[1..]
        .iter()
        .map(|&p| u32::from(grid.cost(p).unwrap()))
        .sum();
    assert_eq!(total, outcome.cost);

    // Every straight segment between turning points honours the run bounds.
    let waypoints = outcome.waypoints();
    for pair in waypoints.windows(2) {
        let run = pair[0].row.abs_diff(pair[1].row) + pair[0].col.abs_diff(pair[1].col);
        assert!(pair[0].row == pair[1].row || pair[0].col == pair[1].col);
        assert!((4..=10).contains(&run), "segment of {run} cells");
    }
}

#[test]
fn invalid_fixture_is_rejected() {
    let path = common::fixtures_dir().join("invalid.txt");
    let err = CostGrid::from_path(&path).expect_err("non-digit");
    assert!(matches!(err, Error::InvalidGrid { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = common::fixtures_dir().join("does-not-exist.txt");
    let err = CostGrid::from_path(&path).expect_err("missing");
    assert!(matches!(err, Error::Io(_)));
}
