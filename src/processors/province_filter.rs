use crate::models::{Dataset, ProvinceFilter};
use crate::utils::constants::COLUMN_PROVINCE;

/// Province dropdown entries for a dataset, without the "all" sentinel.
/// Empty when the dataset is empty or has no province column.
pub fn province_options(dataset: &Dataset) -> Vec<String> {
    if dataset.is_empty() {
        return Vec::new();
    }
    dataset.distinct_values(COLUMN_PROVINCE)
}

/// Restrict `dataset` to rows whose province equals the selected one exactly.
///
/// The "all" sentinel, an empty dataset or a missing province column pass the
/// dataset through unchanged.
pub fn filter_by_province(dataset: &Dataset, province: &ProvinceFilter) -> Dataset {
    let name = match province {
        ProvinceFilter::Province(name) => name,
        ProvinceFilter::All => return dataset.clone(),
    };

    if dataset.is_empty() || !dataset.has_column(COLUMN_PROVINCE) {
        return dataset.clone();
    }

    dataset.filter_rows(|row| row.get(COLUMN_PROVINCE) == Some(name.as_str()))
}
