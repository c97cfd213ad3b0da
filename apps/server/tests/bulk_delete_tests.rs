//! Bulk delete contract tests

#[allow(unused)]
mod support;

use fleetops::{db::PlaceStore, services::bulk_delete, Error};
use support::*;
use uuid::Uuid;

#[tokio::test]
async fn empty_id_list_fails_and_deletes_nothing() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let store = InMemoryPlaceStore::with_places(vec![place(company_id, "Yard A", 0.0, 0.0)]);

    let err = bulk_delete(&store, company_id, &[])
        .await
        .expect_err("empty list must fail");

    assert!(matches!(err, Error::NothingToDelete));
    assert_eq!(err.to_string(), "Nothing to delete.");
    assert_eq!(store.live_rows(company_id).len(), 1);

    Ok(())
}

#[tokio::test]
async fn reports_exact_match_count_and_removes_the_rows() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let a = place(company_id, "Yard A", 0.0, 0.0);
    let b = place(company_id, "Yard B", 0.0, 0.0);
    let keep = place(company_id, "Yard C", 0.0, 0.0);
    let ids = vec![a.id, b.id, Uuid::new_v4()]; // one id matches nothing

    let store = InMemoryPlaceStore::with_places(vec![a.clone(), b.clone(), keep.clone()]);

    let outcome = bulk_delete(&store, company_id, &ids).await?;

    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.message(), "Deleted 2 places");

    // A subsequent search finds none of the deleted identifiers.
    let remaining = PlaceStore::search(
        &store,
        company_id,
        None,
        fleetops::db::PlaceOrdering::NameDescending,
        None,
    )
    .await?;
    let remaining_ids: Vec<Uuid> = remaining.iter().map(|p| p.id).collect();
    assert!(!remaining_ids.contains(&a.id));
    assert!(!remaining_ids.contains(&b.id));
    assert!(remaining_ids.contains(&keep.id));

    Ok(())
}

#[tokio::test]
async fn place_deletion_is_soft() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let a = place(company_id, "Yard A", 0.0, 0.0);
    let store = InMemoryPlaceStore::with_places(vec![a.clone()]);

    bulk_delete(&store, company_id, &[a.id]).await?;

    // Physically retained, logically gone.
    let rows = store.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].deleted_at.is_some());

    Ok(())
}

#[tokio::test]
async fn zero_effect_delete_fails_even_after_counting() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let store = InMemoryPlaceStore::with_places(vec![place(company_id, "Yard A", 0.0, 0.0)]);

    // No matching ids: count is 0 and delete affects 0 rows.
    let err = bulk_delete(&store, company_id, &[Uuid::new_v4()])
        .await
        .expect_err("zero-effect delete must fail");

    assert!(matches!(err, Error::BulkDeleteFailed("places")));
    assert_eq!(err.to_string(), "Failed to bulk delete places.");

    Ok(())
}

#[tokio::test]
async fn reported_count_is_the_pre_delete_count_not_the_affected_rows() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let a = place(company_id, "Yard A", 0.0, 0.0);
    let b = place(company_id, "Yard B", 0.0, 0.0);

    // Simulate a concurrent modification between count and delete: the
    // delete reports fewer rows than the count observed. The divergence is
    // not detected; the pre-delete count is what gets reported.
    let mut store = InMemoryPlaceStore::with_places(vec![a.clone(), b.clone()]);
    store.forced_delete_count = Some(1);

    let outcome = bulk_delete(&store, company_id, &[a.id, b.id]).await?;

    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.message(), "Deleted 2 places");

    Ok(())
}

#[tokio::test]
async fn tenant_scoping_ignores_other_companies_rows() -> anyhow::Result<()> {
    let company_id = Uuid::new_v4();
    let other_company = Uuid::new_v4();
    let theirs = place(other_company, "Theirs", 0.0, 0.0);
    let store = InMemoryPlaceStore::with_places(vec![theirs.clone()]);

    // Matching id, wrong tenant: nothing to count, nothing deleted.
    let err = bulk_delete(&store, company_id, &[theirs.id])
        .await
        .expect_err("cross-tenant delete must fail");

    assert!(matches!(err, Error::BulkDeleteFailed("places")));
    assert_eq!(store.live_rows(other_company).len(), 1);

    Ok(())
}
