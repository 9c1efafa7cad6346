//! Deterministic category rules mapping transaction descriptions to
//! Tenge's `Category` buckets.
//!
//! Case-insensitive substring match over an ordered table; the first rule
//! that matches wins. No external state, no learning.

use tenge_core::Category;

/// One row of the rule table: any keyword hit selects `category`.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

/// Ordered rule table. Keywords are lower-case.
///
/// Food, transport and healthcare come first; the remaining rows only see
/// descriptions none of those matched.
pub const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::Food,
        keywords: &[
            "еда",
            "магазин",
            "супермаркет",
            "продукты",
            "кафе",
            "ресторан",
            "кофейня",
            "magnum",
            "small",
            "galmart",
            "glovo",
            "wolt",
        ],
    },
    CategoryRule {
        category: Category::Transport,
        keywords: &[
            "транспорт",
            "автобус",
            "такси",
            "метро",
            "азс",
            "бензин",
            "парковка",
            "onay",
            "taxi",
        ],
    },
    CategoryRule {
        category: Category::Healthcare,
        keywords: &[
            "аптека",
            "здоровье",
            "медицина",
            "клиника",
            "стоматолог",
            "больница",
            "pharm",
        ],
    },
    CategoryRule {
        category: Category::Utilities,
        keywords: &["коммунал", "электроэнерг", "водоканал", "газ ", "интернет", "kazakhtelecom"],
    },
    CategoryRule {
        category: Category::Education,
        keywords: &["образовани", "университет", "школа", "курсы", "обучение"],
    },
    CategoryRule {
        category: Category::Entertainment,
        keywords: &["кино", "театр", "концерт", "кинотеатр", "развлечен"],
    },
    CategoryRule {
        category: Category::Subscriptions,
        keywords: &["подписка", "netflix", "spotify", "youtube", "apple.com"],
    },
    CategoryRule {
        category: Category::Travel,
        keywords: &["авиабилет", "гостиница", "отель", "air astana", "scat", "booking"],
    },
    CategoryRule {
        category: Category::Clothing,
        keywords: &["одежда", "обувь", "zara", "lc waikiki"],
    },
    CategoryRule {
        category: Category::Insurance,
        keywords: &["страхован", "полис"],
    },
    CategoryRule {
        category: Category::Salary,
        keywords: &["зарплата", "заработная плата", "salary"],
    },
];

/// Categorize a transaction description.
pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| desc.contains(kw)))
        .map(|rule| rule.category)
        .unwrap_or(Category::OtherExpense)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_table() {
        let fixtures = [
            ("Покупка в магазине", Category::Food),
            ("Такси Яндекс", Category::Transport),
            ("Аптека №3", Category::Healthcare),
            ("случайный текст", Category::OtherExpense),
        ];
        for (description, expected) in fixtures {
            assert_eq!(categorize(description), expected, "{description}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(categorize("СУПЕРМАРКЕТ SMALL"), Category::Food);
        assert_eq!(categorize("аПтЕкА"), Category::Healthcare);
        assert_eq!(categorize("Yandex TAXI"), Category::Transport);
    }

    #[test]
    fn test_first_rule_wins() {
        // Both a food and a transport keyword: food is earlier in the table.
        assert_eq!(categorize("Кафе у автобуса"), Category::Food);
        assert_eq!(categorize("Такси до аптеки"), Category::Transport);
    }

    #[test]
    fn test_extended_rules() {
        assert_eq!(categorize("Оплата за коммунальные услуги"), Category::Utilities);
        assert_eq!(categorize("Зарплата за сентябрь"), Category::Salary);
        assert_eq!(categorize("Подписка Netflix"), Category::Subscriptions);
        assert_eq!(categorize(""), Category::OtherExpense);
    }

    #[test]
    fn test_pure_and_repeatable() {
        for description in ["Кафе Алматы", "перевод", "Аптека", "", "Air Astana"] {
            assert_eq!(categorize(description), categorize(description));
        }
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for rule in RULES {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase(), "keyword {kw:?} must be lower-case");
            }
        }
    }
}
