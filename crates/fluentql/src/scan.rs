//! Rows to host structs.

use crate::error::{OrmError, OrmResult};
use crate::record::{FieldMapping, Record};
use crate::row::Row;
use std::sync::Arc;

/// Column position to field index, resolved for one column list.
struct ScanPlan {
    columns: Arc<[String]>,
    targets: Vec<Option<usize>>,
}

impl ScanPlan {
    fn new(columns: &Arc<[String]>, mapping: &FieldMapping) -> Self {
        Self {
            columns: Arc::clone(columns),
            targets: columns.iter().map(|c| mapping.by_name(c)).collect(),
        }
    }

    fn matches(&self, columns: &Arc<[String]>) -> bool {
        Arc::ptr_eq(&self.columns, columns) || *self.columns == **columns
    }
}

/// Decode one row into a fresh `T`.
///
/// Columns that map to no field are ignored.
pub fn scan_row<T: Record + Default + 'static>(row: &Row) -> OrmResult<T> {
    let mapping = FieldMapping::of::<T>();
    let plan = ScanPlan::new(row.columns(), &mapping);
    decode(row, &plan)
}

/// Decode every row into a `T`, stopping at the first decode failure.
pub fn scan_rows<T: Record + Default + 'static>(rows: &[Row]) -> OrmResult<Vec<T>> {
    let mapping = FieldMapping::of::<T>();
    let mut plan: Option<ScanPlan> = None;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let current = match plan.take() {
            Some(p) if p.matches(row.columns()) => p,
            _ => ScanPlan::new(row.columns(), &mapping),
        };
        out.push(decode(row, &current)?);
        plan = Some(current);
    }
    Ok(out)
}

fn decode<T: Record + Default>(row: &Row, plan: &ScanPlan) -> OrmResult<T> {
    let mut item = T::default();
    for (pos, target) in plan.targets.iter().enumerate() {
        let Some(idx) = *target else { continue };
        let value = row.values().get(pos).cloned().unwrap_or_default();
        item.write_field(idx, value)
            .map_err(|message| OrmError::decode(plan.columns[pos].as_str(), message))?;
    }
    Ok(item)
}
