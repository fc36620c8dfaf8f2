use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_locations_table::Migration),
            Box::new(m20250101_000002_create_tags_table::Migration),
            Box::new(m20250101_000003_create_facilities_table::Migration),
            Box::new(m20250101_000004_create_facility_tags_table::Migration),
        ]
    }
}

// Migration implementations

mod m20250101_000001_create_locations_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000001_create_locations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Locations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Locations::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Locations::City).string().not_null())
                        .col(ColumnDef::new(Locations::Address).string().not_null())
                        .col(ColumnDef::new(Locations::ZipCode).string().not_null())
                        .col(ColumnDef::new(Locations::CountryCode).string().not_null())
                        .col(ColumnDef::new(Locations::PhoneNumber).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Locations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Locations {
        Table,
        Id,
        City,
        Address,
        ZipCode,
        CountryCode,
        PhoneNumber,
    }
}

mod m20250101_000002_create_tags_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000002_create_tags_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tags::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tags::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Tags::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            // Uniqueness on the name is the last line of defense against two
            // by-name syncs racing to create the same tag.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_tags_name_unique")
                        .table(Tags::Table)
                        .col(Tags::Name)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tags::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Tags {
        Table,
        Id,
        Name,
    }
}

mod m20250101_000003_create_facilities_table {

    use sea_orm_migration::prelude::*;

    use super::m20250101_000001_create_locations_table::Locations;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000003_create_facilities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Facilities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Facilities::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Facilities::Name).string().not_null())
                        .col(ColumnDef::new(Facilities::LocationId).integer().not_null())
                        .col(
                            ColumnDef::new(Facilities::CreationDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_facilities_location_id")
                                .from(Facilities::Table, Facilities::LocationId)
                                .to(Locations::Table, Locations::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_facilities_location_id")
                        .table(Facilities::Table)
                        .col(Facilities::LocationId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Facilities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Facilities {
        Table,
        Id,
        Name,
        LocationId,
        CreationDate,
    }
}

mod m20250101_000004_create_facility_tags_table {

    use sea_orm_migration::prelude::*;

    use super::m20250101_000002_create_tags_table::Tags;
    use super::m20250101_000003_create_facilities_table::Facilities;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250101_000004_create_facility_tags_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(FacilityTags::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(FacilityTags::FacilityId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(FacilityTags::TagId).integer().not_null())
                        .primary_key(
                            Index::create()
                                .col(FacilityTags::FacilityId)
                                .col(FacilityTags::TagId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_facility_tags_facility_id")
                                .from(FacilityTags::Table, FacilityTags::FacilityId)
                                .to(Facilities::Table, Facilities::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_facility_tags_tag_id")
                                .from(FacilityTags::Table, FacilityTags::TagId)
                                .to(Tags::Table, Tags::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_facility_tags_tag_id")
                        .table(FacilityTags::Table)
                        .col(FacilityTags::TagId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(FacilityTags::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum FacilityTags {
        Table,
        FacilityId,
        TagId,
    }
}
