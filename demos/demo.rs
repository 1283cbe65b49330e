//! Quick tour of RowHaus against an in-memory SQLite database
//!
//! Run with: cargo run --example demo

use rowhaus::prelude::*;

#[model]
#[entity(crate = "rowhaus::entity_mapper")]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub pages: i32,
    pub in_print: bool,
}

#[tokio::main]
async fn main() -> Result<(), RowHausError> {
    println!("🚀 RowHaus demo");

    let rowhaus = RowHaus::new(DatabaseConfig::in_memory()).await?;
    sqlx::query("CREATE TABLE BOOKS (isbn TEXT PRIMARY KEY, title TEXT, pages INTEGER, in_print TEXT)")
        .execute(rowhaus.pool())
        .await?;

    println!("📋 Generated statements:");
    println!("   {}", build_insert::<Book>());
    println!("   {}", build_update::<Book>().map_err(MapperError::from)?);
    println!("   {}", build_select_by_id::<Book>().map_err(MapperError::from)?);
    println!("   {}", build_select_all::<Book>());

    let books = rowhaus.repository::<Book>();
    let dune = Book {
        isbn: "978-0441013593".to_string(),
        title: "Dune".to_string(),
        pages: 604,
        in_print: true,
    };
    books.insert(&dune).await?;
    println!("✅ Inserted {}", dune.title);

    let reissue = Book {
        pages: 688,
        ..dune.clone()
    };
    books.update(&reissue).await?;

    match books.find_by_id(&dune.isbn).await? {
        Some(book) => println!("🔍 Found {} ({} pages)", book.title, book.pages),
        None => println!("❓ {} not found", dune.isbn),
    }

    let long_books = books
        .find_all_by(FindQuery::new().filter("pages", 688))
        .await?;
    println!("📚 {} book(s) with 688 pages", long_books.len());

    let by_title = books
        .find(
            "SELECT * FROM BOOKS WHERE title = ?",
            &Criteria::new().with("title", "Dune"),
        )
        .await?;
    println!("🔍 Criteria lookup: {:?}", by_title.map(|b| b.isbn));

    if let Err(e) = books.save(&dune).await {
        println!("⚠️  {}", e);
    }

    println!("🎉 Done");
    Ok(())
}
