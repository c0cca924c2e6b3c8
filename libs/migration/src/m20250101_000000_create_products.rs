use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(products_table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await
    }
}

/// `id` is store-assigned; new rows start out available.
fn products_table() -> TableCreateStatement {
    Table::create()
        .table(Products::Table)
        .if_not_exists()
        .col(pk_auto(Products::Id))
        .col(string(Products::Name))
        .col(double(Products::Price))
        .col(boolean(Products::Availability).default(true))
        .to_owned()
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Availability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_products_table_sql() {
        let sql = products_table().to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""products""#));
        for column in ["id", "name", "price", "availability"] {
            assert!(sql.contains(&format!(r#""{column}""#)), "{column} missing: {sql}");
        }
        assert!(sql.contains("PRIMARY KEY"));
    }
}
