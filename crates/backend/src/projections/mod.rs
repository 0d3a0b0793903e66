pub mod p900_rule_conflicts;
