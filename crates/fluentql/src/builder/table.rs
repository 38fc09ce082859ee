use super::QueryBuilder;

/// `ON DELETE` behaviour of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyAction {
    /// Delete referencing rows.
    Cascade,
    /// Null out the referencing column.
    SetNull,
    /// Refuse to delete a referenced row.
    Restrict,
}

impl ForeignKeyAction {
    pub fn as_sql(self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "ON DELETE CASCADE",
            ForeignKeyAction::SetNull => "ON DELETE SET NULL",
            ForeignKeyAction::Restrict => "ON DELETE RESTRICT",
        }
    }
}

/// Column definitions and constraints for `CREATE TABLE`.
impl<'h> QueryBuilder<'h> {
    /// Column definition: `name attributes`.
    pub fn field(&mut self, name: &str, attributes: &str) -> &mut Self {
        let attributes = attributes.trim();
        if attributes.is_empty() {
            self.columns.push(name.to_string());
        } else {
            self.columns.push(format!("{name} {attributes}"));
        }
        self
    }

    /// `UNIQUE(k1, k2)`.
    pub fn unique(&mut self, keys: &[&str]) -> &mut Self {
        self.constraints.push(format!("UNIQUE({})", keys.join(", ")));
        self
    }

    /// `INDEX(k1, k2)`.
    pub fn index(&mut self, keys: &[&str]) -> &mut Self {
        self.constraints.push(format!("INDEX({})", keys.join(", ")));
        self
    }

    /// `PRIMARY KEY (key)`. Pass `"a, b"` for a composite key.
    pub fn primary_key(&mut self, key: &str) -> &mut Self {
        self.constraints.push(format!("PRIMARY KEY ({key})"));
        self
    }

    /// `FOREIGN KEY (local) REFERENCES table (field) [ON DELETE ...]`.
    pub fn foreign_key(
        &mut self,
        local_field: &str,
        remote_table: &str,
        remote_field: &str,
        on_delete: Option<ForeignKeyAction>,
    ) -> &mut Self {
        let mut key =
            format!("FOREIGN KEY ({local_field}) REFERENCES {remote_table} ({remote_field})");
        if let Some(action) = on_delete {
            key.push(' ');
            key.push_str(action.as_sql());
        }
        self.constraints.push(key);
        self
    }
}
