//! Демонстрационные правила и товары каталога.
//!
//! Набор воспроизводит страницы управления правилами и конфликтов:
//! конфликт SKU против категории, Keyword против категории, KeyCat против
//! категории и конфликт одного уровня (Keyword против KeyCat).

use chrono::{DateTime, TimeZone, Utc};
use contracts::domain::a001_attribute_rule::aggregate::{AttributeRule, RuleCondition};
use contracts::domain::a002_catalog_product::aggregate::CatalogProduct;
use contracts::enums::criterion::Criterion;
use contracts::enums::rule_action::RuleAction;
use contracts::enums::rule_kind::RuleKind;

fn may(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, 10, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn skus(values: &[&str]) -> RuleCondition {
    RuleCondition {
        skus: values.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn keyword(word: &str) -> RuleCondition {
    RuleCondition {
        keyword: Some(word.to_string()),
        ..Default::default()
    }
}

fn category(path: &str) -> RuleCondition {
    RuleCondition {
        categories: vec![path.to_string()],
        ..Default::default()
    }
}

fn keycat(word: &str, path: &str) -> RuleCondition {
    RuleCondition {
        keyword: Some(word.to_string()),
        categories: vec![path.to_string()],
        ..Default::default()
    }
}

#[allow(clippy::too_many_arguments)]
fn rule(
    code: &str,
    description: &str,
    kind: RuleKind,
    criterion: Criterion,
    action: RuleAction,
    is_enabled: bool,
    condition: RuleCondition,
    created: u32,
    updated: u32,
) -> AttributeRule {
    AttributeRule::new_for_insert(
        code.to_string(),
        description.to_string(),
        kind,
        criterion,
        action,
        is_enabled,
        condition,
        None,
        None,
    )
    .with_timestamps(may(created), may(updated))
}

fn with_message(mut rule: AttributeRule, message: &str) -> AttributeRule {
    rule.customer_message = Some(message.to_string());
    rule
}

/// Демонстрационные правила (коды RULE-0001..RULE-0009)
pub fn sample_rules() -> Vec<AttributeRule> {
    use Criterion::*;
    use RuleAction::*;
    use RuleKind::*;

    vec![
        rule(
            "RULE-0001",
            "15 SKUs de equipos importados sin certificación",
            Regulatory,
            Sku,
            Exclude,
            true,
            skus(&["SONY-WH1000XM4", "CAN-EOS-001"]),
            10,
            10,
        ),
        rule(
            "RULE-0002",
            "Productos con keyword \"defectuoso\"",
            Blocklist,
            Keyword,
            Exclude,
            true,
            keyword("defectuoso"),
            9,
            12,
        ),
        rule(
            "RULE-0003",
            "Inclusión de productos de Electrónica > Audio",
            Allowlist,
            Category,
            Include,
            true,
            category("Electrónica > Audio"),
            8,
            8,
        ),
        rule(
            "RULE-0004",
            "Categoría Electrónica con keyword \"refurbished\"",
            Blocklist,
            KeywordCategory,
            Exclude,
            false,
            keycat("refurbished", "Electrónica"),
            7,
            11,
        ),
        rule(
            "RULE-0005",
            "Electrónica > Telecomunicaciones",
            Regulatory,
            Category,
            Include,
            true,
            category("Electrónica > Telecomunicaciones"),
            6,
            6,
        ),
        rule(
            "RULE-0006",
            "Inclusión de productos de Electrónica > Celulares",
            Allowlist,
            Category,
            Include,
            true,
            category("Electrónica > Celulares"),
            5,
            5,
        ),
        rule(
            "RULE-0007",
            "Electrónica > Computación habilitada por URSEC",
            Regulatory,
            Category,
            Include,
            true,
            category("Electrónica > Computación"),
            4,
            4,
        ),
        with_message(
            rule(
                "RULE-0008",
                "Laptops con keyword \"reacondicionado\"",
                Blocklist,
                KeywordCategory,
                Exclude,
                true,
                keycat("reacondicionado", "Electrónica > Computación > Laptops"),
                3,
                9,
            ),
            "Los equipos reacondicionados no están disponibles en este momento",
        ),
        rule(
            "RULE-0009",
            "Parlantes bluetooth destacados",
            Allowlist,
            KeywordCategory,
            Include,
            true,
            keycat("bluetooth", "Electrónica > Audio > Parlantes"),
            13,
            13,
        ),
    ]
}

/// Товар и коды правил, которые к нему применимы
pub struct SampleProduct {
    pub product: CatalogProduct,
    pub rule_codes: Vec<&'static str>,
}

fn product(
    sku: &str,
    name: &str,
    category_path: &str,
    keywords: &[&str],
    rule_codes: Vec<&'static str>,
) -> SampleProduct {
    SampleProduct {
        product: CatalogProduct::new_for_insert(
            sku.to_string(),
            name.to_string(),
            category_path.to_string(),
            keywords.iter().map(|k| k.to_string()).collect(),
        ),
        rule_codes,
    }
}

/// Демонстрационные товары каталога
pub fn sample_products() -> Vec<SampleProduct> {
    vec![
        product(
            "SONY-WH1000XM4",
            "Auricular Bluetooth Sony WH-1000XM4",
            "Electrónica > Audio > Auriculares",
            &["bluetooth", "auricular", "sony"],
            vec!["RULE-0001", "RULE-0003"],
        ),
        product(
            "SAM-GALAXY-S21",
            "Smartphone Samsung Galaxy S21",
            "Electrónica > Celulares > Smartphones",
            &["smartphone", "samsung", "defectuoso"],
            vec!["RULE-0002", "RULE-0006"],
        ),
        product(
            "APPLE-MACBOOK-PRO",
            "Laptop Apple MacBook Pro",
            "Electrónica > Computación > Laptops",
            &["laptop", "apple", "reacondicionado"],
            vec!["RULE-0007", "RULE-0008"],
        ),
        product(
            "JBL-BTH-001",
            "Parlante Bluetooth JBL",
            "Electrónica > Audio > Parlantes",
            &["bluetooth", "parlante", "jbl", "defectuoso"],
            vec!["RULE-0002", "RULE-0003", "RULE-0009"],
        ),
        product(
            "BOSE-BTH-001",
            "Auricular Bluetooth Bose",
            "Electrónica > Audio > Auriculares",
            &["bluetooth", "auricular", "bose"],
            vec!["RULE-0003"],
        ),
        product(
            "CAN-EOS-001",
            "Cámara Canon EOS",
            "Electrónica > Fotografía > Cámaras",
            &["camara", "canon"],
            vec![],
        ),
        product(
            "SAM-TV-001",
            "Smart TV Samsung",
            "Electrónica > TV & Video > Smart TV",
            &["tv", "samsung", "refurbished"],
            vec!["RULE-0004"],
        ),
    ]
}
