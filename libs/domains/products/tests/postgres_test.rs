//! PostgreSQL repository tests against Sea-ORM's mock connection.

use domain_products::{
    CreateProduct, PgProductRepository, Product, ProductError, ProductRepository, UpdateProduct,
    entity,
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

fn row(id: i32, name: &str, price: f64, availability: bool) -> entity::Model {
    entity::Model {
        id,
        name: name.to_string(),
        price,
        availability,
    }
}

#[tokio::test]
async fn test_find_all_maps_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(1, "Mouse", 25.0, true), row(2, "Monitor", 300.0, false)]])
        .into_connection();
    let repo = PgProductRepository::new(db);

    let products = repo.find_all().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].name, "Monitor");
    assert!(!products[1].availability);
}

#[tokio::test]
async fn test_find_by_id_missing_row_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<entity::Model>::new()])
        .into_connection();
    let repo = PgProductRepository::new(db);

    assert_eq!(repo.find_by_id(5).await.unwrap(), None);
}

#[tokio::test]
async fn test_insert_returns_stored_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(1, "Keyboard", 45.0, true)]])
        .into_connection();
    let repo = PgProductRepository::new(db);

    let product = repo
        .insert(CreateProduct {
            name: "Keyboard".to_string(),
            price: 45.0,
        })
        .await
        .unwrap();

    assert_eq!(
        product,
        Product {
            id: 1,
            name: "Keyboard".to_string(),
            price: 45.0,
            availability: true,
        }
    );
}

#[tokio::test]
async fn test_update_of_vanished_row_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<entity::Model>::new()])
        .into_connection();
    let repo = PgProductRepository::new(db);

    let result = repo
        .update_by_id(
            9,
            UpdateProduct {
                name: "Gone".to_string(),
                price: 1.0,
                availability: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_delete_reports_affected_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();
    let repo = PgProductRepository::new(db);

    assert!(repo.delete_by_id(1).await.unwrap());
    assert!(!repo.delete_by_id(1).await.unwrap());
}

#[tokio::test]
async fn test_query_failure_is_database_error() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();
    let repo = PgProductRepository::new(db);

    let err = repo.find_all().await.unwrap_err();
    assert!(matches!(err, ProductError::Database(_)));
}
