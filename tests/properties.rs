use chrono::NaiveDate;
use proptest::prelude::*;
use sigami::{
    collation,
    data::RawValue,
    dates::to_date,
    filter::{self, FilterCriteria},
    key::normalize_key,
    record::Record,
    sort::{SortState, sort_rows},
};

const STATUSES: [&str; 4] = ["Concluída", "Em Atendimento", "Não Iniciado", ""];
const SUBSECRETARIAS: [&str; 3] = ["SUBEXEC", "SUBCLAM", "SUBINFRAS"];

fn record_strategy() -> impl Strategy<Value = Record> {
    (
        "[0-9]{1,4}",
        "[a-zA-Zçãé ]{0,12}",
        0..SUBSECRETARIAS.len(),
        0..STATUSES.len(),
        proptest::option::of(0u32..60),
        "[a-z ]{0,8}",
    )
        .prop_map(|(protocolo, assunto, sub, status, offset, analista)| Record {
            protocolo,
            assunto,
            subsecretaria: SUBSECRETARIAS[sub].to_string(),
            status: STATUSES[status].to_string(),
            abertura: offset.map(day),
            prazo: None,
            analista,
            cidade: "Belford Roxo".into(),
            bairro: "Centro".into(),
            uf: "RJ".into(),
        })
}

fn day(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap() + chrono::Duration::days(i64::from(offset))
}

fn criteria_strategy() -> impl Strategy<Value = FilterCriteria> {
    (
        proptest::option::of(0..STATUSES.len()),
        proptest::option::of(0..SUBSECRETARIAS.len()),
        proptest::option::of("[a-z0-9]{1,2}"),
        proptest::option::of(0u32..60),
        proptest::option::of(0u32..60),
    )
        .prop_map(|(status, sub, search, start, end)| {
            let mut criteria = FilterCriteria::default()
                .with_start(start.map(day))
                .with_end(end.map(day));
            if let Some(idx) = status {
                criteria = criteria.with_status(STATUSES[idx]);
            }
            if let Some(idx) = sub {
                criteria = criteria.with_subsecretaria(SUBSECRETARIAS[idx]);
            }
            if let Some(search) = search {
                criteria = criteria.with_search(search);
            }
            criteria
        })
}

/// Criteria over disjoint fields: each field is kept by `first` when its
/// owner flag is set and by `second` otherwise.
fn split_fields(
    left: &FilterCriteria,
    right: &FilterCriteria,
    owners: [bool; 5],
) -> (FilterCriteria, FilterCriteria) {
    let pick = |own: bool, value: Option<String>| if own { value } else { None };
    let first = FilterCriteria {
        status: pick(owners[0], left.status.clone()),
        subsecretaria: pick(owners[1], left.subsecretaria.clone()),
        search: pick(owners[2], left.search.clone()),
        start: left.start.filter(|_| owners[3]),
        end: left.end.filter(|_| owners[4]),
    };
    let second = FilterCriteria {
        status: pick(!owners[0], right.status.clone()),
        subsecretaria: pick(!owners[1], right.subsecretaria.clone()),
        search: pick(!owners[2], right.search.clone()),
        start: right.start.filter(|_| !owners[3]),
        end: right.end.filter(|_| !owners[4]),
    };
    (first, second)
}

proptest! {
    #[test]
    fn to_date_is_total_on_text(text in "\\PC{0,24}") {
        let _ = to_date(&RawValue::Text(text));
    }

    #[test]
    fn to_date_is_total_on_numbers(serial in proptest::num::f64::ANY) {
        let parsed = to_date(&RawValue::Number(serial));
        if !serial.is_finite() || serial <= 0.0 {
            prop_assert_eq!(parsed, None);
        }
    }

    #[test]
    fn normalized_keys_are_stable(raw in "\\PC{0,16}") {
        let once = normalize_key(&raw);
        prop_assert_eq!(normalize_key(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn collation_ignores_case(text in "[a-zA-Zçãéí ]{0,12}") {
        prop_assert_eq!(
            collation::compare(&text, &text.to_uppercase()),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn filtered_rows_are_an_ordered_subset(
        records in proptest::collection::vec(record_strategy(), 0..24),
        criteria in criteria_strategy(),
    ) {
        let filtered = filter::apply(&records, &criteria);
        let mut remaining = records.iter();
        for row in &filtered {
            prop_assert!(criteria.matches(row));
            prop_assert!(remaining.any(|candidate| candidate == row));
        }
        prop_assert_eq!(
            filtered.len(),
            records.iter().filter(|r| criteria.matches(r)).count()
        );
    }

    #[test]
    fn filters_compose(
        records in proptest::collection::vec(record_strategy(), 0..24),
        left in criteria_strategy(),
        right in criteria_strategy(),
        owners in proptest::array::uniform5(any::<bool>()),
    ) {
        let (first, second) = split_fields(&left, &right, owners);
        let chained = filter::apply(&filter::apply(&records, &first), &second);
        let combined = filter::apply(&records, &first.combine(&second));
        prop_assert_eq!(&chained, &combined);
        let together: Vec<Record> = records
            .iter()
            .filter(|r| first.matches(r) && second.matches(r))
            .cloned()
            .collect();
        prop_assert_eq!(chained, together);
    }

    #[test]
    fn sorting_permutes_rows(
        records in proptest::collection::vec(record_strategy(), 0..24),
        column in "(protocolo|assunto|status|abertura)(:asc|:desc)?",
    ) {
        let state: SortState = column.parse().unwrap();
        let sorted = sort_rows(records.clone(), state);
        prop_assert_eq!(sorted.len(), records.len());
        for record in &records {
            prop_assert_eq!(
                sorted.iter().filter(|r| *r == record).count(),
                records.iter().filter(|r| *r == record).count()
            );
        }
    }
}
