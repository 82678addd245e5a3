use game_tree::games::ultimate_tic_tac_toe::{Move, UltimateTicTacToeState};
use game_tree::{GameTreeNode, Player};
use monte_carlo_tree_search::{FinalSelection, SearchConfig, SearchTree};

/// X has claimed the center box and is sent to the top-middle box.
fn midgame() -> UltimateTicTacToeState {
    ["1 1 0 0", "0 0 1 1", "1 1 2 2", "2 2 1 1", "1 1 1 1", "0 1 0 1"]
        .iter()
        .fold(UltimateTicTacToeState::new(), |state, text| {
            let mv = text.parse::<Move>().expect("valid move text");
            state.play(mv).expect("legal move")
        })
}

#[test]
fn midgame_position_is_as_expected() {
    let root = midgame();
    assert_eq!(root.box_owner(1, 1), Ok(Some(Player::X)));
    assert_eq!(root.current_player(), Player::X);
    assert_eq!(root.target_box(), Some((0, 1)));
}

#[test]
fn both_presets_pick_a_legal_move() {
    let root = midgame();
    let children = root.children();

    for config in &[SearchConfig::vanilla(), SearchConfig::modified()] {
        let config = config.clone().with_iterations(200).with_threads(2).with_seed(99);
        let tree = SearchTree::new();
        let chosen = tree
            .think(&root, &config)
            .expect("valid config")
            .expect("game is not over");

        assert!(children.contains(&chosen));
        assert_eq!(chosen.current_player(), root.current_player().next());
    }
}

#[test]
fn most_visited_child_matches_visit_counts() {
    let root = midgame();
    let children = root.children();
    let tree = SearchTree::new();
    let config = SearchConfig::modified()
        .with_iterations(300)
        .with_threads(1)
        .with_seed(3);
    tree.search(root, &config).expect("valid config");

    let best = tree
        .best_child(&children, FinalSelection::MostVisits)
        .expect("children were visited");
    let best_visits = tree
        .metadata(best)
        .map(|meta| meta.number_of_visits())
        .expect("best child has statistics");

    for child in &children {
        let visits = tree.metadata(child).map_or(0, |meta| meta.number_of_visits());
        assert!(visits <= best_visits);
    }
}

#[test]
fn child_visits_add_up_to_root_visits() {
    let root = midgame();
    let tree = SearchTree::new();
    let config = SearchConfig::vanilla()
        .with_iterations(120)
        .with_threads(3)
        .with_seed(8);
    tree.search(root.clone(), &config).expect("valid config");

    let root_visits = tree
        .metadata(&root)
        .map(|meta| meta.number_of_visits())
        .expect("root has statistics");
    let child_visits: u32 = root
        .children()
        .iter()
        .filter_map(|child| tree.metadata(child))
        .map(|meta| meta.number_of_visits())
        .sum();

    assert_eq!(root_visits, 120);
    assert_eq!(child_visits, 120);
}

#[test]
fn win_rates_stay_within_bounds() {
    let root = midgame();
    let tree = SearchTree::new();
    let config = SearchConfig::modified().with_iterations(100).with_seed(21);
    tree.search(root.clone(), &config).expect("valid config");

    for child in root.children() {
        if let Some(win_rate) = tree.metadata(&child).and_then(|meta| meta.win_rate()) {
            assert!((0.0..=1.0).contains(&win_rate));
        }
    }
}
