#[cfg(test)]
mod tests {
    use unordered_pair::UnorderedPair;

    use crate::builder::GraphBuilder;
    use crate::error::{BuildError, LegendError};
    use crate::grid::Grid;
    use crate::legend::{Category, Legend, SymbolRole};
    use crate::location::Location;
    use crate::rules::{parse_rule, parse_rules, ParsedRule, Rule};

    fn ascii_builder() -> GraphBuilder {
        let mut builder = GraphBuilder::default();
        builder.legend_mut()
            .with_symbol("K", SymbolRole::Family { primary: Category::King, secondary: Category::Prince })
            .with_symbol("Q", SymbolRole::Family { primary: Category::Queen, secondary: Category::Princess })
            .with_symbol("J", SymbolRole::Fixed(Category::Jester))
            .with_symbol("C", SymbolRole::Fixed(Category::Chief))
            .with_symbol("M", SymbolRole::Fixed(Category::Maid));
        builder
    }

    #[test]
    fn castle_demo() {
        let text = "\
🧱🧱🧱🧱🧱🧱
🧱 🤴 👸   🧱
🧱   🤹    🧱
🧱  🛡️     🧱
🧱🧱🧱🧱🧱🧱
JESTER DANCES WITH ALL
KING DOES NOT DANCE WITH QUEEN
";
        let graph = GraphBuilder::default().build(text).unwrap();

        assert_eq!(graph.ids(), vec!["🤴#1", "👸#1", "🤹#1", "🛡\u{FE0F}#1"]);
        assert_eq!(graph.categories(), vec![Category::King, Category::Queen, Category::Jester, Category::Chief]);
        assert_eq!(graph.positions(), vec![Location(1, 2), Location(1, 4), Location(2, 4), Location(3, 3)]);
        assert_eq!(graph.edges(), vec![(0, 2), (1, 2), (2, 3)]);
        assert_eq!(format!("{}", graph), "0 0 1 0
0 0 1 0
1 1 0 1
0 0 1 0
");
    }

    #[test]
    fn jester_king_queen_chief() {
        let text = "\
######
#K Q #
# J  #
#  C #
######
JESTER DANCES WITH ALL
KING DOES NOT DANCE WITH QUEEN
";
        let graph = ascii_builder().build(text).unwrap();
        let (king, queen, jester, chief) = (0, 1, 2, 3);

        assert_eq!(graph.categories(), vec![Category::King, Category::Queen, Category::Jester, Category::Chief]);
        assert_eq!(graph.distances().get(king, queen), Some(2));
        assert_eq!(graph.distances().get(king, chief), Some(4));

        for other in [king, queen, chief] {
            assert!(graph.is_linked(jester, other));
        }
        // king and queen are co-nearest, but the rule wins
        assert!(!graph.is_linked(king, queen));
        // distance 2 is the queen's minimum, 4 is not the king's
        assert!(graph.is_linked(queen, chief));
        assert!(!graph.is_linked(king, chief));
        assert_eq!(graph.edges(), vec![(0, 2), (1, 2), (1, 3), (2, 3)]);
        assert!(graph.adjacency().is_well_formed());
    }

    #[test]
    fn ties_link_every_co_minimal_neighbor() {
        let text = "\
#######
#M C M#
#######
";
        let graph = ascii_builder().build(text).unwrap();

        // the chief is 2 away from both maids, the maids are 4 apart
        assert_eq!(graph.edges(), vec![(0, 1), (1, 2)]);
        assert_eq!(graph.degree(1), 2);
    }

    #[test]
    fn nearest_relation_is_symmetrized() {
        let text = "\
##########
#M C    M#
##########
";
        let graph = ascii_builder().build(text).unwrap();

        // the far maid's nearest is the chief, whose own nearest is the close maid
        assert!(graph.is_linked(1, 2));
        assert!(graph.is_linked(0, 1));
        assert!(!graph.is_linked(0, 2));
    }

    #[test]
    fn sealed_room_stays_unlinked() {
        let text = "\
#######
#K# J #
###   #
#######
JESTER DANCES WITH ALL
";
        let graph = ascii_builder().build(text).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.distances().get(0, 1), None);
        assert_eq!(graph.distances().get(1, 0), None);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.to_graphmap().node_count(), 2);
    }

    #[test]
    fn no_wall_is_malformed() {
        let err = ascii_builder().build("K Q\n J\nJESTER DANCES WITH ALL\n").unwrap_err();
        assert_eq!(err, BuildError::MalformedInput);
    }

    #[test]
    fn empty_castle_has_no_occupants() {
        let err = ascii_builder().build("####\n#  #\n#🏰 #\n####\n").unwrap_err();
        assert_eq!(err, BuildError::NoOccupants);
    }

    #[test]
    fn royal_quota() {
        let text = "#KKK#\n#QQ #\n";
        let graph = ascii_builder().build(text).unwrap();

        assert_eq!(graph.categories(), vec![
            Category::King, Category::Prince, Category::Prince,
            Category::Queen, Category::Princess,
        ]);
        // counters run per symbol and category
        assert_eq!(graph.ids(), vec!["K#1", "K#1", "K#2", "Q#1", "Q#1"]);

        let mut builder = ascii_builder();
        builder.legend_mut().with_quota(Category::King, 2);
        let graph = builder.build(text).unwrap();
        assert_eq!(&graph.categories()[..3], &[Category::King, Category::King, Category::Prince]);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let text = "\
##########
#K  Q  K #
#  J   X #
##########
JESTER DANCES WITH ALL
PRINCE DOES NOT DANCE WITH JESTER
";
        let builder = ascii_builder();
        let first = builder.build(text).unwrap();
        let second = builder.build(text).unwrap();

        assert_eq!(first.ids(), second.ids());
        assert_eq!(first.categories(), second.categories());
        assert_eq!(first.adjacency(), second.adjacency());
        // the quota did not carry over into the second build
        assert_eq!(second.categories()[0], Category::King);
        assert_eq!(second.categories()[2], Category::Prince);
    }

    #[test]
    fn unknown_symbols_fall_back() {
        let graph = ascii_builder().build("#X?#\n").unwrap();

        assert_eq!(graph.ids(), vec!["X#1", "?#1"]);
        assert_eq!(graph.categories(), vec![Category::Knight, Category::Knight]);

        let mut builder = ascii_builder();
        builder.legend_mut().with_fallback(Category::Proletariat);
        let graph = builder.build("#X?#\n").unwrap();
        assert_eq!(graph.categories(), vec![Category::Proletariat, Category::Proletariat]);
    }

    #[test]
    fn longest_symbol_wins() {
        let mut builder = GraphBuilder::default();
        builder.legend_mut()
            .with_symbol("AB", SymbolRole::Fixed(Category::Elite))
            .with_symbol("A", SymbolRole::Fixed(Category::Maid));
        let graph = builder.build("#AB A#\n").unwrap();

        assert_eq!(graph.ids(), vec!["AB#1", "A#1"]);
        assert_eq!(graph.categories(), vec![Category::Elite, Category::Maid]);
        assert_eq!(graph.positions(), vec![Location(0, 1), Location(0, 4)]);
        assert_eq!(graph.distances().get(0, 1), Some(3));
    }

    #[test]
    fn forbid_beats_connect_all() {
        let text = "\
#########
#J     K#
#   Q   #
#########
JESTER DANCES WITH ALL
jester does not dance with king
";
        let graph = ascii_builder().build(text).unwrap();
        let jester = graph.index_of("J#1").unwrap();
        let king = graph.index_of("K#1").unwrap();
        let queen = graph.index_of("Q#1").unwrap();

        assert!(!graph.is_linked(jester, king));
        assert!(graph.is_linked(jester, queen));
    }

    #[test]
    fn grid_is_squared_off() {
        let legend = Legend::default();
        let grid = Grid::parse("###\n#\n###  \n\nKING DOES NOT DANCE WITH QUEEN\n\n", &legend).unwrap();

        assert_eq!(grid.dims(), (3, 5));
        assert_eq!(grid.symbol_at(Location(1, 3)), Some(' '));
        assert!(grid.is_passable(Location(1, 3)));
        assert!(!grid.is_passable(Location(0, 0)));
        assert!(!grid.is_passable(Location(3, 0)));
        assert_eq!(grid.rule_lines(), &["KING DOES NOT DANCE WITH QUEEN".to_string()]);
        assert_eq!(grid.tiles().filter(|tile| !tile.passable).count(), 7);
    }

    #[test]
    fn multi_character_walls() {
        let mut legend = Legend::default();
        legend.with_walls(["[]"]);
        let grid = Grid::parse("[][][]\n[]K[Q]\n[][][]\n", &legend).unwrap();

        assert_eq!(grid.tiles().filter(|tile| !tile.passable).count(), 14);
        assert!(!grid.tile(Location(1, 1)).unwrap().passable);
        // neither "[Q" nor "Q]" spells a wall
        assert!(grid.tile(Location(1, 3)).unwrap().passable);
        assert!(grid.tile(Location(1, 5)).unwrap().passable);
    }

    #[test]
    fn odd_wall_runs_leave_no_occupant_behind() {
        let mut builder = ascii_builder();
        builder.legend_mut().with_walls(["##"]);
        // overlapping matches wall off all five cells, though "##" only fits twice without overlap
        let graph = builder.build("#####\n##J K\n#####\n").unwrap();

        assert_eq!(graph.ids(), vec!["J#1", "K#1"]);
        assert!(graph.distances().is_symmetric());
        assert_eq!(graph.distances().get(0, 1), Some(2));
        assert_eq!(graph.edges(), vec![(0, 1)]);

        let graph = builder.build("#####\n##J  \n").unwrap();
        assert_eq!(graph.ids(), vec!["J#1"]);
        assert!(graph.distances().is_symmetric());
    }

    #[test]
    fn rule_grammar() {
        assert_eq!(parse_rule("  jester   Dances WITH all "), ParsedRule::Recognized(Rule::ConnectAll(Category::Jester)));
        assert_eq!(parse_rule("MAID DANCES WITH ALL"), ParsedRule::Recognized(Rule::ConnectAll(Category::Maid)));
        assert_eq!(
            parse_rule("king does not dance with queen"),
            ParsedRule::Recognized(Rule::Forbid(UnorderedPair(Category::King, Category::Queen))),
        );
        assert_eq!(parse_rule("KING DOES NOT DANCE WITH DRAGON"), ParsedRule::Ignored);
        assert_eq!(parse_rule("KING DANCES WITH QUEEN"), ParsedRule::Ignored);
        assert_eq!(parse_rule("KING, DOES NOT DANCE WITH QUEEN"), ParsedRule::Ignored);
        assert_eq!(parse_rule(""), ParsedRule::Ignored);
        assert_eq!("JESTER DANCES WITH ALL".parse::<ParsedRule>(), Ok(ParsedRule::Recognized(Rule::ConnectAll(Category::Jester))));

        let rules = parse_rules(&[
            "KING DOES NOT DANCE WITH QUEEN",
            "the band plays on",
            "QUEEN DOES NOT DANCE WITH KING",
            "JESTER DANCES WITH ALL",
        ]);
        assert_eq!(rules, vec![
            Rule::Forbid(UnorderedPair(Category::King, Category::Queen)),
            Rule::ConnectAll(Category::Jester),
        ]);
        assert_eq!(rules[1].to_string(), "JESTER DANCES WITH ALL");
    }

    #[test]
    fn legend_from_toml() {
        let legend = Legend::from_toml_str(r#"
walls = ["X"]
fallback = "elite"

[symbols]
"J" = "JESTER"
"R" = { primary = "KING", secondary = "PRINCE" }

[quotas]
KING = 2
"#).unwrap();

        assert!(legend.is_wall("X"));
        assert!(!legend.is_wall("#"));
        assert!(legend.is_entrance("🏰"));
        assert_eq!(legend.fallback(), Category::Elite);
        assert_eq!(legend.role_of("J"), Some(SymbolRole::Fixed(Category::Jester)));
        assert_eq!(legend.role_of("🤹"), Some(SymbolRole::Fixed(Category::Jester)));
        assert_eq!(legend.quota_for(Category::King), 2);
        assert_eq!(legend.quota_for(Category::Queen), 1);

        let builder = GraphBuilder::with_legend(legend);
        assert_eq!(builder.legend().quota_for(Category::King), 2);
        let graph = builder.build("XRRRX\nXJ#X\n").unwrap();
        assert_eq!(graph.categories(), vec![
            Category::King, Category::King, Category::Prince, Category::Jester, Category::Elite,
        ]);
    }

    #[test]
    fn legend_rejects_unknown_categories() {
        let err = Legend::from_toml_str("[symbols]\n\"D\" = \"DRAGON\"\n").unwrap_err();
        assert!(matches!(err, LegendError::UnknownCategory(name) if name == "DRAGON"));

        let err = Legend::from_toml_str("[quotas]\nEMPEROR = 3\n").unwrap_err();
        assert!(matches!(err, LegendError::UnknownCategory(_)));

        assert!(matches!(Legend::from_toml_str("walls = ["), Err(LegendError::Toml(_))));
        assert!(matches!(Legend::from_toml_str("walls = [\"\"]"), Err(LegendError::EmptySymbol)));
    }

    #[test]
    fn serializes_for_downstream_matching() {
        let graph = ascii_builder().build("#K J#\n").unwrap();
        let json = serde_json::to_value(&graph).unwrap();

        assert_eq!(json["nodes"], serde_json::json!(["K#1", "J#1"]));
        assert_eq!(json["categories"], serde_json::json!(["KING", "JESTER"]));
        assert_eq!(json["positions"], serde_json::json!([[0, 1], [0, 3]]));
        assert_eq!(json["matrix"], serde_json::json!([[0, 1], [1, 0]]));
        assert_eq!(json["edges"], serde_json::json!([[0, 1]]));
        assert_eq!(json["rules"], serde_json::json!([]));

        let graph = ascii_builder().build("#K J#\nQUEEN DOES NOT DANCE WITH KING\nqueen does not dance with king\n").unwrap();
        assert_eq!(graph.rules(), &[Rule::Forbid(UnorderedPair(Category::Queen, Category::King))]);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["rules"], serde_json::json!(["QUEEN DOES NOT DANCE WITH KING"]));
    }
}
