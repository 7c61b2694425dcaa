use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mappings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Mappings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Mappings::PatientId).uuid().not_null())
                    .col(ColumnDef::new(Mappings::DoctorId).uuid().not_null())
                    .col(
                        ColumnDef::new(Mappings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mappings_patient_id")
                            .from(Mappings::Table, Mappings::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mappings_doctor_id")
                            .from(Mappings::Table, Mappings::DoctorId)
                            .to(Doctors::Table, Doctors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One link per (patient, doctor) pair.
        manager
            .create_index(
                Index::create()
                    .table(Mappings::Table)
                    .col(Mappings::PatientId)
                    .col(Mappings::DoctorId)
                    .unique()
                    .name("uq_mappings_patient_id_doctor_id")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Mappings::Table)
                    .col(Mappings::DoctorId)
                    .name("idx_mappings_doctor_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mappings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Mappings {
    Table,
    Id,
    PatientId,
    DoctorId,
    CreatedAt,
}

#[derive(Iden)]
enum Patients {
    Table,
    Id,
}

#[derive(Iden)]
enum Doctors {
    Table,
    Id,
}
