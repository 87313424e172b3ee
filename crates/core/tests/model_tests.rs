use budget_tracker_core::models::chart::{ChartDataset, ChartPoint, ChartStyle};
use budget_tracker_core::models::command::Command;
use budget_tracker_core::models::filter::{CategoryFilter, TransactionFilter, YearMonth};
use budget_tracker_core::models::ledger::Ledger;
use budget_tracker_core::models::settings::{ExportLayout, Settings};
use budget_tracker_core::models::summary::Insight;
use budget_tracker_core::models::transaction::{
    legacy_id, Recurrence, Transaction, TransactionKind, UNCATEGORIZED,
};
use budget_tracker_core::models::view::RowAction;
use chrono::NaiveDate;
use uuid::Uuid;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionKind
// ═══════════════════════════════════════════════════════════════════

mod transaction_kind {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(TransactionKind::Income.to_string(), "income");
        assert_eq!(TransactionKind::Expense.to_string(), "expense");
    }

    #[test]
    fn sign() {
        assert_eq!(TransactionKind::Income.sign(), 1.0);
        assert_eq!(TransactionKind::Expense.sign(), -1.0);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert_eq!(" EXPENSE ".parse::<TransactionKind>().unwrap(), TransactionKind::Expense);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransactionKind::Expense).unwrap(), "\"expense\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Recurrence
// ═══════════════════════════════════════════════════════════════════

mod recurrence {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(Recurrence::default(), Recurrence::None);
        assert!(!Recurrence::None.is_recurring());
        assert!(Recurrence::Monthly.is_recurring());
    }

    #[test]
    fn parse() {
        assert_eq!("".parse::<Recurrence>().unwrap(), Recurrence::None);
        assert_eq!("Biweekly".parse::<Recurrence>().unwrap(), Recurrence::Biweekly);
        assert!("yearly".parse::<Recurrence>().is_err());
    }

    #[test]
    fn weekly_and_biweekly_steps() {
        let anchor = d(2024, 1, 1);
        assert_eq!(Recurrence::Weekly.advance(anchor, 1), Some(d(2024, 1, 8)));
        assert_eq!(Recurrence::Weekly.advance(anchor, 5), Some(d(2024, 2, 5)));
        assert_eq!(Recurrence::Biweekly.advance(anchor, 2), Some(d(2024, 1, 29)));
    }

    #[test]
    fn none_never_advances() {
        assert_eq!(Recurrence::None.advance(d(2024, 1, 1), 1), None);
    }

    #[test]
    fn monthly_preserves_day_of_month() {
        let anchor = d(2024, 1, 15);
        assert_eq!(Recurrence::Monthly.advance(anchor, 1), Some(d(2024, 2, 15)));
        assert_eq!(Recurrence::Monthly.advance(anchor, 12), Some(d(2025, 1, 15)));
    }

    #[test]
    fn monthly_clamps_to_end_of_short_months_without_drift() {
        let anchor = d(2024, 1, 31);
        assert_eq!(Recurrence::Monthly.advance(anchor, 1), Some(d(2024, 2, 29)));
        assert_eq!(Recurrence::Monthly.advance(anchor, 2), Some(d(2024, 3, 31)));
        assert_eq!(Recurrence::Monthly.advance(anchor, 3), Some(d(2024, 4, 30)));
        assert_eq!(Recurrence::Monthly.advance(anchor, 13), Some(d(2025, 2, 28)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    fn template() -> Transaction {
        let mut t = Transaction::new("Rent", 400.0, TransactionKind::Expense, d(2024, 1, 1));
        t.category = Some("Housing".into());
        t.recurrence = Recurrence::Monthly;
        t.recurrence_end = Some(d(2024, 12, 31));
        t
    }

    #[test]
    fn new_defaults() {
        let t = Transaction::new("Pay", 1000.0, TransactionKind::Income, d(2024, 1, 1));
        assert!(t.active);
        assert_eq!(t.recurrence, Recurrence::None);
        assert!(t.parent_id.is_none());
        assert!(!t.is_template());
        assert!(!t.is_generated());
    }

    #[test]
    fn unique_ids() {
        let a = Transaction::new("a", 1.0, TransactionKind::Income, d(2024, 1, 1));
        let b = Transaction::new("a", 1.0, TransactionKind::Income, d(2024, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn signed_amount() {
        let t = template();
        assert_eq!(t.signed_amount(), -400.0);
    }

    #[test]
    fn category_label_falls_back() {
        let t = Transaction::new("x", 1.0, TransactionKind::Expense, d(2024, 1, 1));
        assert_eq!(t.category_label(), UNCATEGORIZED);
        assert_eq!(template().category_label(), "Housing");
    }

    #[test]
    fn template_classification() {
        let mut t = template();
        assert!(t.is_template());
        assert!(t.generates_instances());
        t.active = false;
        assert!(t.is_template());
        assert!(!t.generates_instances());
    }

    #[test]
    fn instance_copies_everything_but_id_parent_and_date() {
        let t = template();
        let i = t.instance_on(d(2024, 2, 1));
        assert_ne!(i.id, t.id);
        assert_eq!(i.parent_id, Some(t.id));
        assert_eq!(i.date, d(2024, 2, 1));
        assert_eq!(i.description, t.description);
        assert_eq!(i.amount, t.amount);
        assert_eq!(i.kind, t.kind);
        assert_eq!(i.category, t.category);
        assert_eq!(i.recurrence, t.recurrence);
        assert_eq!(i.recurrence_end, t.recurrence_end);
        assert_eq!(i.active, t.active);
    }

    #[test]
    fn instances_are_never_templates() {
        let i = template().instance_on(d(2024, 2, 1));
        assert!(i.is_generated());
        assert!(!i.is_template());
        assert!(!i.generates_instances());
    }

    #[test]
    fn wire_field_names() {
        let t = template();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["recurrence"], "monthly");
        assert_eq!(json["recurrenceEnd"], "2024-12-31");
        assert_eq!(json["date"], "2024-01-01");
        assert!(json["parentId"].is_null());
        assert_eq!(json["active"], true);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let json = format!(
            r#"{{"id":"{}","description":"Coffee","amount":3.5,"type":"expense","date":"2024-05-02"}}"#,
            Uuid::new_v4()
        );
        let t: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(t.recurrence, Recurrence::None);
        assert!(t.active);
        assert!(t.category.is_none());
        assert!(t.parent_id.is_none());
        assert!(t.recurrence_end.is_none());
    }

    #[test]
    fn numeric_ids_map_to_stable_uuids() {
        let json = r#"{"id":1704067200000,"description":"Rent","amount":400,"type":"expense",
            "date":"2024-02-01","parentId":1704067100000}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.id, legacy_id(1_704_067_200_000));
        assert_eq!(t.parent_id, Some(legacy_id(1_704_067_100_000)));
        assert_eq!(t.amount, 400.0);

        let again: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(again.id, t.id);
    }

    #[test]
    fn reloaded_legacy_id_keeps_its_uuid() {
        let json = r#"{"id":42,"description":"x","amount":1,"type":"income","date":"2024-01-01"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        let reloaded: Transaction =
            serde_json::from_str(&serde_json::to_string(&t).unwrap()).unwrap();
        assert_eq!(reloaded.id, legacy_id(42));
    }

    #[test]
    fn bad_ids_are_rejected() {
        for id in [r#""not-an-id""#, "-1", "1.5", "true"] {
            let json = format!(
                r#"{{"id":{id},"description":"x","amount":1,"type":"income","date":"2024-01-01"}}"#
            );
            assert!(serde_json::from_str::<Transaction>(&json).is_err(), "{id}");
        }
    }

    #[test]
    fn blank_category_loads_as_uncategorized() {
        for category in [r#""""#, r#""  ""#, "null"] {
            let json = format!(
                r#"{{"id":1,"description":"x","amount":1,"type":"income","date":"2024-01-01","category":{category}}}"#
            );
            let t: Transaction = serde_json::from_str(&json).unwrap();
            assert!(t.category.is_none(), "{category}");
            assert_eq!(t.category_label(), UNCATEGORIZED);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Ledger
// ═══════════════════════════════════════════════════════════════════

mod ledger {
    use super::*;

    #[test]
    fn serializes_as_bare_array() {
        let ledger = Ledger::default();
        assert_eq!(serde_json::to_string(&ledger).unwrap(), "[]");
    }

    #[test]
    fn get_and_instances_of() {
        let mut template = Transaction::new("Gym", 30.0, TransactionKind::Expense, d(2024, 1, 1));
        template.recurrence = Recurrence::Monthly;
        let instance = template.instance_on(d(2024, 2, 1));
        let other = Transaction::new("Pay", 10.0, TransactionKind::Income, d(2024, 1, 3));
        let ledger = Ledger::new(vec![template.clone(), instance.clone(), other]);

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.get(instance.id), Some(&instance));
        assert!(ledger.get(Uuid::new_v4()).is_none());
        let ids: Vec<Uuid> = ledger.instances_of(template.id).map(|t| t.id).collect();
        assert_eq!(ids, vec![instance.id]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Filters
// ═══════════════════════════════════════════════════════════════════

mod filters {
    use super::*;

    fn sample() -> Vec<Transaction> {
        let mut food = Transaction::new("Lunch", 12.0, TransactionKind::Expense, d(2024, 3, 4));
        food.category = Some("Food".into());
        let mut pay = Transaction::new("Pay", 900.0, TransactionKind::Income, d(2024, 4, 1));
        pay.category = Some("Job".into());
        let misc = Transaction::new("Misc", 5.0, TransactionKind::Expense, d(2024, 3, 30));
        vec![food, pay, misc]
    }

    #[test]
    fn year_month_ordering_is_chronological() {
        let a = YearMonth::new(2023, 12).unwrap();
        let b = YearMonth::new(2024, 1).unwrap();
        assert!(a < b);
        assert!(YearMonth::new(2024, 0).is_none());
    }

    #[test]
    fn all_matches_everything() {
        let txs = sample();
        assert_eq!(TransactionFilter::all().apply(&txs).len(), 3);
    }

    #[test]
    fn month_filter() {
        let txs = sample();
        let f = TransactionFilter::all().with_month(YearMonth::new(2024, 3).unwrap());
        let names: Vec<&str> = f.apply(&txs).iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["Lunch", "Misc"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let txs = sample();
        assert_eq!(TransactionFilter::all().with_category("Food").apply(&txs).len(), 1);
        assert_eq!(TransactionFilter::all().with_category("food").apply(&txs).len(), 0);
        assert_eq!(
            TransactionFilter::all().with_category(UNCATEGORIZED).apply(&txs).len(),
            1
        );
    }

    #[test]
    fn combined_filter() {
        let txs = sample();
        let f = TransactionFilter::from_inputs("Job", "2024-03").unwrap();
        assert!(f.apply(&txs).is_empty());
    }

    #[test]
    fn from_inputs_all_and_empty() {
        let f = TransactionFilter::from_inputs("all", "").unwrap();
        assert_eq!(f, TransactionFilter::all());
        assert_eq!(f.category, CategoryFilter::All);
    }

    #[test]
    fn from_inputs_rejects_bad_month() {
        assert!(TransactionFilter::from_inputs("all", "March").is_err());
    }

    #[test]
    fn apply_keeps_source_untouched() {
        let txs = sample();
        let before = txs.clone();
        let _ = TransactionFilter::all().with_category("Food").apply(&txs);
        assert_eq!(txs, before);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Insight, Settings, Charts, Commands
// ═══════════════════════════════════════════════════════════════════

mod misc {
    use super::*;

    #[test]
    fn insight_classification() {
        assert_eq!(Insight::from_totals(500.0, 200.0), Insight::NetSaver);
        assert_eq!(Insight::from_totals(200.0, 500.0), Insight::NetSpender);
        assert_eq!(Insight::from_totals(100.0, 100.0), Insight::NetSpender);
        assert_eq!(Insight::NetSaver.to_string(), "net saver");
        assert!(Insight::NetSpender.message().contains("net spender"));
    }

    #[test]
    fn equal_totals_message_does_not_claim_overspending() {
        let insight = Insight::from_totals(0.0, 0.0);
        assert_eq!(
            insight.message(),
            "You are a net spender: expenses match or exceed income."
        );
    }

    #[test]
    fn chart_style_toggles() {
        assert_eq!(ChartStyle::default(), ChartStyle::Line);
        assert_eq!(ChartStyle::Line.toggled(), ChartStyle::Bar);
        assert_eq!(ChartStyle::Bar.toggled(), ChartStyle::Line);
        assert_eq!(serde_json::to_string(&ChartStyle::Bar).unwrap(), r#""bar""#);
        assert_eq!(ChartStyle::Line.to_string(), "line");
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.transactions_key, "transactions");
        assert_eq!(s.theme_key, "darkMode");
        assert_eq!(s.chart_style_key, "chartType");
        assert_eq!(s.currency_symbol, "$");
        assert_eq!(s.projection_days, 30);
        assert_eq!(s.export_layout, ExportLayout::DescriptionFirst);
        assert_eq!(s.export_file_name, "transactions.csv");
    }

    #[test]
    fn settings_partial_json() {
        let s = Settings::from_json(r#"{"currency_symbol":"€","export_layout":"CategoryFirst"}"#)
            .unwrap();
        assert_eq!(s.currency_symbol, "€");
        assert_eq!(s.export_layout, ExportLayout::CategoryFirst);
        assert_eq!(s.projection_days, 30);
    }

    #[test]
    fn settings_bad_json() {
        assert!(Settings::from_json("{").is_err());
    }

    #[test]
    fn chart_dataset_accessors() {
        let ds = ChartDataset {
            label: "Income".into(),
            points: vec![ChartPoint::new("Jan 2024", 10.0), ChartPoint::new("Feb 2024", 20.0)],
        };
        assert_eq!(ds.labels(), vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(ds.values(), vec![10.0, 20.0]);
        assert!(!ds.is_empty());
    }

    #[test]
    fn row_actions_map_to_commands() {
        let id = Uuid::new_v4();
        assert_eq!(Command::for_row(id, RowAction::Delete), Command::Delete(id));
        assert_eq!(
            Command::for_row(id, RowAction::StopRecurrence),
            Command::StopRecurrence(id)
        );
    }
}
