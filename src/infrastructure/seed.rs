use chrono::NaiveDate;
use sea_orm::*;

use crate::models::{author, book, category, review, user};

struct DemoBook {
    title: &'static str,
    volume_id: &'static str,
    author: (&'static str, &'static str),
    genre: &'static str,
    pages: i32,
    year: i32,
    reviews: &'static [(&'static str, i32, &'static str)],
}

const DEMO_BOOKS: &[DemoBook] = &[
    DemoBook {
        title: "The Mythical Man-Month",
        volume_id: "Yq35BY5Fk3gC",
        author: ("Frederick P.", "Brooks"),
        genre: "Computers",
        pages: 348,
        year: 1995,
        reviews: &[
            ("alice", 5, "Still painfully accurate."),
            ("bob", 4, "Dated examples, timeless lessons."),
        ],
    },
    DemoBook {
        title: "Clean Code",
        volume_id: "hjEFCAAAQBAJ",
        author: ("Robert C.", "Martin"),
        genre: "Computers",
        pages: 431,
        year: 2008,
        reviews: &[("alice", 3, "Good rules, applied too strictly.")],
    },
    DemoBook {
        title: "Dune",
        volume_id: "",
        author: ("Frank", "Herbert"),
        genre: "Fiction",
        pages: 412,
        year: 1965,
        reviews: &[],
    },
];

/// Insert demo users, authors, categories, books and reviews. Safe to run repeatedly.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // 1. Users
    for (username, email) in [("alice", "alice@example.org"), ("bob", "bob@example.org")] {
        let user = user::ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            subscribed: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        };

        user::Entity::insert(user)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(user::Column::Username)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    // 2. Books with their author, category and reviews
    for demo in DEMO_BOOKS {
        if book::Entity::find()
            .filter(book::Column::Title.eq(demo.title))
            .one(db)
            .await?
            .is_some()
        {
            continue;
        }

        let author_id = match author::Entity::find()
            .filter(author::Column::Lastname.eq(demo.author.1))
            .one(db)
            .await?
        {
            Some(a) => a.id,
            None => {
                author::ActiveModel {
                    firstname: Set(demo.author.0.to_owned()),
                    lastname: Set(demo.author.1.to_owned()),
                    created_at: Set(now.clone()),
                    updated_at: Set(now.clone()),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };

        let category_id = match category::Entity::find()
            .filter(category::Column::Genre.eq(demo.genre))
            .one(db)
            .await?
        {
            Some(c) => c.id,
            None => {
                category::ActiveModel {
                    genre: Set(demo.genre.to_owned()),
                    ..Default::default()
                }
                .insert(db)
                .await?
                .id
            }
        };

        let stored = book::ActiveModel {
            id_volume: Set((!demo.volume_id.is_empty()).then(|| demo.volume_id.to_owned())),
            title: Set(demo.title.to_owned()),
            page_number: Set(demo.pages),
            publication_date: Set(NaiveDate::from_ymd_opt(demo.year, 1, 1)),
            author_id: Set(Some(author_id)),
            category_id: Set(Some(category_id)),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for (username, rating, text) in demo.reviews {
            let Some(reviewer) = user::Entity::find()
                .filter(user::Column::Username.eq(*username))
                .one(db)
                .await?
            else {
                continue;
            };

            review::Entity::insert(review::ActiveModel {
                user_id: Set(reviewer.id),
                book_id: Set(stored.id),
                review: Set(Some((*text).to_owned())),
                rating: Set(*rating),
                creation_date: Set(Some(chrono::Utc::now().date_naive())),
            })
            .exec_without_returning(db)
            .await?;
        }
    }

    Ok(())
}
