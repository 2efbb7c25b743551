//! SQL query constants
//!
//! Contains all SQL queries used by the application.

/// Create the dogs table on first start
pub const CREATE_DOGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS dogs (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        breed TEXT NOT NULL,
        description TEXT NOT NULL
    )
"#;

/// Every dog, oldest first
pub const LIST_DOGS: &str = r#"
    SELECT id, name, age, breed, description
    FROM dogs
    ORDER BY id
"#;

pub const FIND_DOG: &str = r#"
    SELECT id, name, age, breed, description
    FROM dogs
    WHERE id = $1
    LIMIT 1
"#;

pub const INSERT_DOG: &str = r#"
    INSERT INTO dogs (name, age, breed, description)
    VALUES ($1, $2, $3, $4)
    RETURNING id, name, age, breed, description
"#;

/// Partial update: NULL parameters keep the current column value
pub const UPDATE_DOG: &str = r#"
    UPDATE dogs SET
        name = COALESCE($2, name),
        age = COALESCE($3, age),
        breed = COALESCE($4, breed),
        description = COALESCE($5, description)
    WHERE id = $1
    RETURNING id, name, age, breed, description
"#;

pub const DELETE_DOG: &str = r#"
    DELETE FROM dogs
    WHERE id = $1
    RETURNING id, name, age, breed, description
"#;
