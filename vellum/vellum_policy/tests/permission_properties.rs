//! Property tests checking the engine against a direct reading of the
//! action table.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::json;
use vellum_core::{Action, ModelId, Permission, Principal, Principals, RecordId, Resource, TokenId};
use vellum_policy::{Authorizer, InMemoryStore, ResourceAcl};

/// Principal universe: Anyone, Authenticated, alice, bob.
fn universe() -> [Principal; 4] {
    [
        Principal::Anyone,
        Principal::Authenticated,
        Principal::Token(TokenId::from_string("alice").unwrap()),
        Principal::Token(TokenId::from_string("bob").unwrap()),
    ]
}

/// Caller 0 is anonymous, 1 is alice, 2 is bob.
fn caller_indices(caller: usize) -> Vec<usize> {
    match caller {
        0 => vec![0],
        1 => vec![0, 1, 2],
        _ => vec![0, 1, 3],
    }
}

#[derive(Debug, Clone)]
struct World {
    grants: Vec<bool>,
    authors: Vec<bool>,
    creators: Vec<bool>,
    caller: usize,
    action: usize,
    model_exists: bool,
    record_exists: bool,
    targets_record: bool,
}

fn arb_world() -> impl Strategy<Value = World> {
    (
        prop::collection::vec(any::<bool>(), Permission::ALL.len() * 4),
        prop::collection::vec(any::<bool>(), 4),
        prop::collection::vec(any::<bool>(), 4),
        0usize..3,
        0usize..Action::ALL.len(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(grants, authors, creators, caller, action, model_exists, record_exists, targets_record)| {
                World {
                    grants,
                    authors,
                    creators,
                    caller,
                    action,
                    model_exists,
                    record_exists,
                    targets_record,
                }
            },
        )
}

fn holds(world: &World, caller: &[usize], permission: Permission) -> bool {
    let index = Permission::ALL
        .iter()
        .position(|p| *p == permission)
        .unwrap();

    if permission == Permission::CreateModel && caller.iter().any(|i| world.creators[*i]) {
        return true;
    }
    if !world.model_exists {
        return false;
    }
    let granted = caller.iter().any(|i| world.grants[index * 4 + i]);
    if !granted {
        return false;
    }
    if permission.is_author_scoped() && world.targets_record {
        let is_author = world.record_exists && caller.iter().any(|i| world.authors[*i]);
        return is_author;
    }
    true
}

fn expected(world: &World) -> bool {
    let caller = caller_indices(world.caller);
    let action = Action::ALL[world.action];
    let can_create = caller.iter().any(|i| world.creators[*i]);

    if action == Action::CreateModel {
        return can_create;
    }
    if action == Action::ReplaceModel && !world.model_exists {
        return can_create;
    }

    let has = |p| holds(world, &caller, p);
    use Permission::*;
    match action {
        Action::CreateModel => has(CreateModel),
        Action::ReadModel => has(ReadDefinition) && has(ReadAcls),
        Action::ReplaceModel => {
            has(CreateModel) && has(UpdateDefinition) && has(UpdateAcls) && has(DeleteModel)
        }
        Action::DeleteModel => has(DeleteModel),
        Action::ReadDefinition => has(ReadDefinition),
        Action::CreateRecord => has(CreateRecord),
        Action::ListRecords => has(ReadAllRecords),
        Action::DeleteRecords => has(DeleteAllRecords),
        Action::ReadRecord => has(ReadMyRecord) || has(ReadAllRecords),
        Action::ReplaceRecord => {
            has(CreateRecord)
                && (has(UpdateMyRecord) || has(UpdateAllRecords))
                && (has(DeleteMyRecord) || has(DeleteAllRecords))
        }
        Action::PatchRecord => has(UpdateMyRecord) || has(UpdateAllRecords),
        Action::DeleteRecord => has(DeleteMyRecord) || has(DeleteAllRecords),
    }
}

fn build(world: &World) -> (Authorizer<InMemoryStore>, Resource, Principals) {
    let universe = universe();
    let model_id = ModelId::from_string("m1").unwrap();
    let record_id = RecordId::from_string("r1").unwrap();

    let store = InMemoryStore::new();
    if world.model_exists {
        let mut acl = ResourceAcl::new();
        for (p, permission) in Permission::ALL.iter().enumerate() {
            for (i, principal) in universe.iter().enumerate() {
                if world.grants[p * 4 + i] {
                    acl.grant(*permission, principal.clone());
                }
            }
        }
        store.put_model(json!({}), acl, Some(model_id.clone()));

        if world.record_exists {
            let authors = universe
                .iter()
                .zip(&world.authors)
                .filter(|(_, is_author)| **is_author)
                .map(|(principal, _)| principal.clone())
                .collect();
            store
                .put_record(&model_id, json!({}), authors, Some(record_id.clone()))
                .unwrap();
        }
    }

    let creators: HashSet<Principal> = universe
        .iter()
        .zip(&world.creators)
        .filter(|(_, is_creator)| **is_creator)
        .map(|(principal, _)| principal.clone())
        .collect();

    let action = Action::ALL[world.action];
    let resource = if action == Action::CreateModel {
        Resource::new_model()
    } else if world.targets_record {
        Resource::record(model_id, record_id)
    } else {
        Resource::model(model_id)
    };

    let principals = caller_indices(world.caller)
        .into_iter()
        .map(|i| universe[i].clone())
        .collect();

    (Authorizer::new(store, creators), resource, principals)
}

proptest! {
    /// The engine agrees with the table read literally.
    #[test]
    fn permits_matches_reference(world in arb_world()) {
        let (engine, resource, principals) = build(&world);
        let action = Action::ALL[world.action];
        prop_assert_eq!(engine.permits(action, &resource, &principals), expected(&world));
    }

    /// Author narrowing never adds permissions.
    #[test]
    fn record_scope_is_narrower(world in arb_world()) {
        let (engine, _, principals) = build(&world);
        let model_id = ModelId::from_string("m1").unwrap();
        let record_id = RecordId::from_string("r1").unwrap();

        let on_model = engine
            .effective_permissions(&Resource::model(model_id.clone()), &principals)
            .unwrap();
        let on_record = engine
            .effective_permissions(&Resource::record(model_id, record_id), &principals)
            .unwrap();

        for permission in on_record.iter() {
            prop_assert!(on_model.contains(permission));
        }
    }

    /// Adding principals to a caller never revokes access.
    #[test]
    fn more_principals_never_deny(world in arb_world()) {
        let (engine, resource, principals) = build(&world);
        let action = Action::ALL[world.action];

        let mut widened = principals.clone();
        for principal in universe() {
            widened.insert(principal);
        }

        if engine.permits(action, &resource, &principals) {
            prop_assert!(engine.permits(action, &resource, &widened));
        }
    }
}
