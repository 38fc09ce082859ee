//! Host struct to row values.

use crate::error::{OrmError, OrmResult};
use crate::record::{FieldFilter, FieldMapping, Record};
use crate::row::RowValues;

/// A value that can be turned into one or more rows to write.
///
/// Implemented for every [`Record`] and for slices / vectors of records, so
/// `bind(&user)` produces one row and `bind(&users)` one row per element.
pub trait Bindable {
    fn bind_rows(&self, filter: &FieldFilter) -> OrmResult<Vec<RowValues>>;
}

/// Columns of `item` that survive `filter`.
///
/// The identity field is never written; fields whose value cannot be read are
/// skipped.
fn bind_one<T: Record>(item: &T, mapping: &FieldMapping, filter: &FieldFilter) -> RowValues {
    let mut row = RowValues::new();
    for (idx, slot) in mapping.select(filter) {
        if slot.identity {
            continue;
        }
        if let Some(value) = item.read_field(idx) {
            row.insert(slot.column, value);
        }
    }
    row
}

fn bind_all<T: Record + 'static>(items: &[T], filter: &FieldFilter) -> OrmResult<Vec<RowValues>> {
    if items.is_empty() {
        return Err(OrmError::bind("cannot bind an empty sequence"));
    }
    let mapping = FieldMapping::of::<T>();
    let rows: Vec<RowValues> = items
        .iter()
        .map(|item| bind_one(item, &mapping, filter))
        .collect();
    if rows.iter().all(RowValues::is_empty) {
        return Err(OrmError::bind(format!(
            "no bindable columns left on {} after filtering",
            std::any::type_name::<T>()
        )));
    }
    Ok(rows)
}

impl<T: Record + 'static> Bindable for T {
    fn bind_rows(&self, filter: &FieldFilter) -> OrmResult<Vec<RowValues>> {
        bind_all(std::slice::from_ref(self), filter)
    }
}

impl<T: Record + 'static> Bindable for [T] {
    fn bind_rows(&self, filter: &FieldFilter) -> OrmResult<Vec<RowValues>> {
        bind_all(self, filter)
    }
}

impl<T: Record + 'static> Bindable for Vec<T> {
    fn bind_rows(&self, filter: &FieldFilter) -> OrmResult<Vec<RowValues>> {
        bind_all(self, filter)
    }
}
