use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(accounts_table()).await?;

        // Emails are stored lowercased and trimmed by the service, so a plain
        // unique index is the authoritative duplicate guard.
        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_email")
                    .table(Accounts::Table)
                    .col(Accounts::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // NULLs never collide, so verified accounts (token cleared) are fine.
        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_verification_token")
                    .table(Accounts::Table)
                    .col(Accounts::VerificationToken)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE accounts
                ADD CONSTRAINT chk_accounts_verified_without_token
                CHECK (NOT (is_verified AND verification_token IS NOT NULL));
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ language 'plpgsql';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_accounts_updated_at
                BEFORE UPDATE ON accounts
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_accounts_updated_at ON accounts")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column")
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

/// Name, email and picture path are unbounded: the service only requires them
/// to be non-empty, so a width limit would surface as a server error.
fn accounts_table() -> TableCreateStatement {
    Table::create()
        .table(Accounts::Table)
        .if_not_exists()
        .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
        .col(ColumnDef::new(Accounts::Name).text().not_null())
        .col(ColumnDef::new(Accounts::Email).text().not_null())
        .col(
            ColumnDef::new(Accounts::PasswordHash)
                .string_len(255)
                .not_null(),
        )
        .col(ColumnDef::new(Accounts::ProfilePicturePath).text())
        .col(
            ColumnDef::new(Accounts::IsVerified)
                .boolean()
                .not_null()
                .default(false),
        )
        .col(ColumnDef::new(Accounts::VerificationToken).char_len(64))
        .col(
            ColumnDef::new(Accounts::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Accounts::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .to_owned()
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    ProfilePicturePath,
    IsVerified,
    VerificationToken,
    CreatedAt,
    UpdatedAt,
}
