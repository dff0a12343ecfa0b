#[macro_export]
macro_rules! drop_table {
    ($table:ident, $manager:ident) => {
        $manager
            .drop_table(Table::drop().table($table::Table).if_exists().to_owned())
            .await?
    };
}

#[macro_export]
macro_rules! drop_type {
    ($type:ident, $manager:ident) => {
        $manager
            .drop_type(Type::drop().if_exists().name($type::Table).to_owned())
            .await?
    };
}

#[macro_export]
macro_rules! create_type {
    ($type:ident, $manager:ident) => {
        $manager
            .create_type(
                Type::create()
                    .as_enum($type::Table)
                    .values($crate::enums::enum_values::<$type>())
                    .to_owned(),
            )
            .await?
    };
}

pub(crate) use create_type;
pub(crate) use drop_table;
pub(crate) use drop_type;
