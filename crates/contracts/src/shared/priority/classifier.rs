use std::cmp::Ordering;

use super::{ClassifierError, Resolution, ResolutionBasis};
use crate::domain::a001_attribute_rule::aggregate::AttributeRule;
use crate::enums::criterion::Criterion;
use crate::enums::priority_tier::PriorityTier;
use crate::enums::tie_break::TieBreak;

/// Уровень приоритета критерия. Таблица фиксирована.
pub fn tier_of(criterion: Criterion) -> PriorityTier {
    match criterion {
        Criterion::Sku => PriorityTier::High,
        Criterion::Keyword => PriorityTier::Medium,
        Criterion::KeywordCategory => PriorityTier::Medium,
        Criterion::Category => PriorityTier::Low,
    }
}

/// Уровень приоритета по коду критерия, пришедшему извне
pub fn tier_of_code(code: &str) -> Result<PriorityTier, ClassifierError> {
    Criterion::from_code(code).map(tier_of)
}

/// Порядок старшинства двух правил: `Greater` — `a` побеждает `b`.
///
/// Сначала уровень критерия, затем политика `tie_break`, затем меньший id.
/// Для разных правил результат никогда не `Equal`.
fn precedence(a: &AttributeRule, b: &AttributeRule, tie_break: TieBreak) -> Ordering {
    let (a_meta, b_meta) = (&a.base.metadata, &b.base.metadata);
    tier_of(a.criterion)
        .cmp(&tier_of(b.criterion))
        .then_with(|| match tie_break {
            TieBreak::MostRecentlyUpdated => a_meta.updated_at.cmp(&b_meta.updated_at),
            TieBreak::FirstCreated => b_meta.created_at.cmp(&a_meta.created_at),
        })
        .then_with(|| b.base.id.cmp(&a.base.id))
}

/// Какое из двух применимых к товару правил действует.
///
/// Оба правила должны быть включены; отбор выполняет вызывающая сторона.
pub fn resolve(primary: &AttributeRule, challenger: &AttributeRule, tie_break: TieBreak) -> Resolution {
    let (winner, loser) = match precedence(primary, challenger, tie_break) {
        Ordering::Less => (challenger, primary),
        _ => (primary, challenger),
    };
    let basis = if tier_of(winner.criterion) > tier_of(loser.criterion) {
        ResolutionBasis::Tier
    } else {
        ResolutionBasis::TieBreak(tie_break)
    };

    Resolution {
        winning_rule_id: winner.base.id,
        effective_action: winner.action,
        winning_tier: tier_of(winner.criterion),
        losing_rule_ids: vec![loser.base.id],
        basis,
    }
}

/// Разрешение конфликта из произвольного числа правил. `None` для пустого набора.
pub fn resolve_all(rules: &[&AttributeRule], tie_break: TieBreak) -> Option<Resolution> {
    let winner = rules
        .iter()
        .copied()
        .reduce(|best, next| match precedence(next, best, tie_break) {
            Ordering::Greater => next,
            _ => best,
        })?;

    let winning_tier = tier_of(winner.criterion);
    let losers: Vec<&AttributeRule> = rules
        .iter()
        .copied()
        .filter(|r| r.base.id != winner.base.id)
        .collect();
    let basis = if losers.iter().all(|r| tier_of(r.criterion) < winning_tier) {
        ResolutionBasis::Tier
    } else {
        ResolutionBasis::TieBreak(tie_break)
    };

    Some(Resolution {
        winning_rule_id: winner.base.id,
        effective_action: winner.action,
        winning_tier,
        losing_rule_ids: losers.iter().map(|r| r.base.id).collect(),
        basis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_attribute_rule::aggregate::RuleCondition;
    use crate::enums::rule_action::RuleAction;
    use crate::enums::rule_kind::RuleKind;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn rule(criterion: Criterion, action: RuleAction) -> AttributeRule {
        AttributeRule::new_for_insert(
            "RULE".into(),
            "test".into(),
            RuleKind::Blocklist,
            criterion,
            action,
            true,
            RuleCondition::default(),
            None,
            None,
        )
    }

    fn dated(criterion: Criterion, created_day: u32, updated_day: u32) -> AttributeRule {
        rule(criterion, RuleAction::Exclude).with_timestamps(
            Utc.with_ymd_and_hms(2025, 5, created_day, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, updated_day, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(tier_of(Criterion::Sku), PriorityTier::High);
        assert_eq!(tier_of(Criterion::Keyword), PriorityTier::Medium);
        assert_eq!(tier_of(Criterion::KeywordCategory), PriorityTier::Medium);
        assert_eq!(tier_of(Criterion::Category), PriorityTier::Low);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(tier_of(Criterion::Sku) > tier_of(Criterion::Keyword));
        assert_eq!(tier_of(Criterion::Keyword), tier_of(Criterion::KeywordCategory));
        assert!(tier_of(Criterion::KeywordCategory) > tier_of(Criterion::Category));
    }

    #[test]
    fn test_tier_of_code() {
        assert_eq!(tier_of_code("SKU"), Ok(PriorityTier::High));
        assert_eq!(tier_of_code("Categoría"), Ok(PriorityTier::Low));
        assert_matches!(
            tier_of_code("Brand"),
            Err(ClassifierError::InvalidCriterion(code)) if code == "Brand"
        );
    }

    #[test]
    fn test_sku_exclude_beats_category_include() {
        let a = rule(Criterion::Sku, RuleAction::Exclude);
        let b = rule(Criterion::Category, RuleAction::Include);
        let resolution = resolve(&a, &b, TieBreak::default());
        assert_eq!(resolution.winning_rule_id, a.base.id);
        assert_eq!(resolution.effective_action, RuleAction::Exclude);
        assert_eq!(resolution.losing_rule_ids, vec![b.base.id]);
        assert!(resolution.decided_by_tier());
    }

    #[test]
    fn test_keyword_exclude_beats_category_include() {
        let a = rule(Criterion::Keyword, RuleAction::Exclude);
        let b = rule(Criterion::Category, RuleAction::Include);
        let resolution = resolve(&a, &b, TieBreak::default());
        assert_eq!(resolution.winning_rule_id, a.base.id);
        assert_eq!(resolution.effective_action, RuleAction::Exclude);
        assert_eq!(resolution.winning_tier, PriorityTier::Medium);
    }

    #[test]
    fn test_keycat_challenger_beats_category_primary() {
        let a = rule(Criterion::Category, RuleAction::Include);
        let b = rule(Criterion::KeywordCategory, RuleAction::Exclude);
        let resolution = resolve(&a, &b, TieBreak::default());
        assert_eq!(resolution.winning_rule_id, b.base.id);
        assert_eq!(resolution.effective_action, RuleAction::Exclude);
        assert_eq!(resolution.losing_rule_ids, vec![a.base.id]);
    }

    #[test]
    fn test_winner_independent_of_argument_order_when_tiers_differ() {
        let criteria = Criterion::all();
        for &x in &criteria {
            for &y in &criteria {
                if tier_of(x) == tier_of(y) {
                    continue;
                }
                let a = rule(x, RuleAction::Include);
                let b = rule(y, RuleAction::Exclude);
                let ab = resolve(&a, &b, TieBreak::default());
                let ba = resolve(&b, &a, TieBreak::default());
                assert_eq!(ab.winning_rule_id, ba.winning_rule_id);
                assert_eq!(ab.effective_action, ba.effective_action);
            }
        }
    }

    #[test]
    fn test_tie_is_deterministic_across_calls() {
        let a = rule(Criterion::Keyword, RuleAction::Exclude);
        let b = rule(Criterion::KeywordCategory, RuleAction::Include);
        for policy in [TieBreak::MostRecentlyUpdated, TieBreak::FirstCreated] {
            let first = resolve(&a, &b, policy);
            for _ in 0..10 {
                assert_eq!(resolve(&a, &b, policy), first);
            }
            assert_eq!(first.basis, ResolutionBasis::TieBreak(policy));
            assert_eq!(resolve(&b, &a, policy).winning_rule_id, first.winning_rule_id);
        }
    }

    #[test]
    fn test_tie_most_recently_updated_wins() {
        let older = dated(Criterion::Keyword, 1, 2);
        let newer = dated(Criterion::KeywordCategory, 1, 9);
        let resolution = resolve(&older, &newer, TieBreak::MostRecentlyUpdated);
        assert_eq!(resolution.winning_rule_id, newer.base.id);
    }

    #[test]
    fn test_tie_first_created_wins() {
        let first = dated(Criterion::KeywordCategory, 7, 11);
        let second = dated(Criterion::Keyword, 9, 12);
        let resolution = resolve(&second, &first, TieBreak::FirstCreated);
        assert_eq!(resolution.winning_rule_id, first.base.id);
    }

    #[test]
    fn test_tie_with_equal_timestamps_falls_back_to_id() {
        let a = dated(Criterion::Keyword, 3, 3);
        let b = dated(Criterion::KeywordCategory, 3, 3);
        let expected = a.base.id.min(b.base.id);
        assert_eq!(resolve(&a, &b, TieBreak::default()).winning_rule_id, expected);
        assert_eq!(resolve(&b, &a, TieBreak::default()).winning_rule_id, expected);
    }

    #[test]
    fn test_resolve_all() {
        assert!(resolve_all(&[], TieBreak::default()).is_none());

        let category = rule(Criterion::Category, RuleAction::Include);
        let keyword = rule(Criterion::Keyword, RuleAction::Exclude);
        let sku = rule(Criterion::Sku, RuleAction::Include);

        let resolution = resolve_all(&[&category, &sku, &keyword], TieBreak::default()).unwrap();
        assert_eq!(resolution.winning_rule_id, sku.base.id);
        assert_eq!(resolution.effective_action, RuleAction::Include);
        assert_eq!(resolution.losing_rule_ids, vec![category.base.id, keyword.base.id]);
        assert!(resolution.decided_by_tier());

        let single = resolve_all(&[&keyword], TieBreak::default()).unwrap();
        assert_eq!(single.winning_rule_id, keyword.base.id);
        assert!(single.losing_rule_ids.is_empty());
    }

    #[test]
    fn test_resolve_all_agrees_with_pairwise_resolve() {
        let a = dated(Criterion::Keyword, 1, 5);
        let b = dated(Criterion::KeywordCategory, 2, 4);
        let pair = resolve(&a, &b, TieBreak::MostRecentlyUpdated);
        let all = resolve_all(&[&b, &a], TieBreak::MostRecentlyUpdated).unwrap();
        assert_eq!(pair.winning_rule_id, all.winning_rule_id);
        assert_eq!(all.basis, ResolutionBasis::TieBreak(TieBreak::MostRecentlyUpdated));
    }
}
