//! Action permission table.
//!
//! Maps every action to the requirement a caller's effective permissions
//! must satisfy. The table is built at startup and read-only afterwards.

use std::collections::BTreeMap;

use vellum_core::{Action, Permission, PolicyError};

use crate::model::Requirement;

/// The mapping from action to requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTable {
    entries: BTreeMap<Action, Requirement>,
}

impl ActionTable {
    /// The table used by the document store.
    pub fn standard() -> Self {
        use Permission::*;

        Self::from_entries([
            (Action::CreateModel, Requirement::all([CreateModel])),
            (
                Action::ReadModel,
                Requirement::all([ReadDefinition, ReadAcls]),
            ),
            (
                Action::ReplaceModel,
                Requirement::all([CreateModel, UpdateDefinition, UpdateAcls, DeleteModel]),
            ),
            (Action::DeleteModel, Requirement::all([DeleteModel])),
            (Action::ReadDefinition, Requirement::all([ReadDefinition])),
            (Action::CreateRecord, Requirement::all([CreateRecord])),
            (Action::ListRecords, Requirement::all([ReadAllRecords])),
            (Action::DeleteRecords, Requirement::all([DeleteAllRecords])),
            (
                Action::ReadRecord,
                Requirement::any([ReadMyRecord, ReadAllRecords]),
            ),
            (
                Action::ReplaceRecord,
                Requirement::all([
                    Requirement::leaf(CreateRecord),
                    Requirement::any([UpdateMyRecord, UpdateAllRecords]),
                    Requirement::any([DeleteMyRecord, DeleteAllRecords]),
                ]),
            ),
            (
                Action::PatchRecord,
                Requirement::any([UpdateMyRecord, UpdateAllRecords]),
            ),
            (
                Action::DeleteRecord,
                Requirement::any([DeleteMyRecord, DeleteAllRecords]),
            ),
        ])
    }

    /// Build a table from explicit entries. Later entries win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Action, Requirement)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Get the requirement for an action.
    ///
    /// # Errors
    ///
    /// * `PolicyError::UnknownAction` - If the table has no entry for it.
    pub fn requirement_for(&self, action: Action) -> Result<&Requirement, PolicyError> {
        self.entries
            .get(&action)
            .ok_or_else(|| PolicyError::UnknownAction(action.to_string()))
    }

    /// Check that every action has an entry.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let missing: Vec<Action> = Action::ALL
            .into_iter()
            .filter(|action| !self.entries.contains_key(action))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PolicyError::IncompleteTable(missing))
        }
    }

    /// Iterate over the entries in action order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, &Requirement)> {
        self.entries.iter().map(|(action, req)| (*action, req))
    }
}

impl Default for ActionTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_is_complete() {
        let table = ActionTable::standard();
        assert!(table.validate().is_ok());
        assert_eq!(table.iter().count(), Action::ALL.len());
    }

    #[test]
    fn test_standard_entries() {
        let table = ActionTable::standard();
        let rendered = |action| table.requirement_for(action).unwrap().to_string();

        assert_eq!(rendered(Action::CreateModel), "ALL[create_model]");
        assert_eq!(
            rendered(Action::ReplaceModel),
            "ALL[create_model, update_definition, update_acls, delete_model]"
        );
        assert_eq!(
            rendered(Action::ReadRecord),
            "ANY[read_my_record, read_all_records]"
        );
        assert_eq!(
            rendered(Action::ReplaceRecord),
            "ALL[create_record, ANY[update_my_record, update_all_records], \
             ANY[delete_my_record, delete_all_records]]"
        );
    }

    #[test]
    fn test_no_entry_is_empty() {
        // Empty combinators would silently allow or deny everything
        for (_, requirement) in ActionTable::standard().iter() {
            assert!(!requirement.permissions().is_empty());
        }
    }

    #[test]
    fn test_missing_entry() {
        let table = ActionTable::from_entries([(
            Action::ReadDefinition,
            Requirement::all([Permission::ReadDefinition]),
        )]);

        assert_eq!(
            table.requirement_for(Action::DeleteModel),
            Err(PolicyError::UnknownAction("delete-model".to_string()))
        );

        match table.validate() {
            Err(PolicyError::IncompleteTable(missing)) => {
                assert_eq!(missing.len(), Action::ALL.len() - 1);
                assert!(!missing.contains(&Action::ReadDefinition));
            }
            other => panic!("Unexpected validation result: {other:?}"),
        }
    }
}
