pub mod d400_rules_overview;
