/// One book known to the mock providers, in source-neutral form.
pub struct FixtureBook {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub authors: &'static [&'static str],
    pub first_publish_year: i32,
    pub published: &'static str,
    pub publish_date_text: &'static str,
    pub isbn13: &'static str,
    pub isbn10: &'static str,
    pub google_id: &'static str,
    pub work_key: &'static str,
    pub edition_url: &'static str,
    pub publisher: &'static str,
    pub description: &'static str,
    pub categories: &'static [&'static str],
    pub average_rating: f64,
    pub language: &'static str,
    pub cover_id: i64,
}

pub const BOOKS: &[FixtureBook] = &[
    FixtureBook {
        title: "Dune",
        subtitle: None,
        authors: &["Frank Herbert"],
        first_publish_year: 1965,
        published: "2005-08-02",
        publish_date_text: "August 2, 2005",
        isbn13: "9780441013593",
        isbn10: "0441013597",
        google_id: "B1hSG45JCX4C",
        work_key: "/works/OL893415W",
        edition_url: "https://openlibrary.org/books/OL7353617M/Dune",
        publisher: "Ace Books",
        description: "Set on the desert planet Arrakis, Dune is the story of Paul Atreides.",
        categories: &["Fiction", "Science Fiction"],
        average_rating: 4.5,
        language: "en",
        cover_id: 11_481_354,
    },
    FixtureBook {
        title: "The Hobbit",
        subtitle: Some("There and Back Again"),
        authors: &["J.R.R. Tolkien"],
        first_publish_year: 1937,
        published: "2002-09",
        publish_date_text: "September 2002",
        isbn13: "9780618260300",
        isbn10: "0618260307",
        google_id: "pD6arNyKyi8C",
        work_key: "/works/OL262758W",
        edition_url: "https://openlibrary.org/books/OL7983427M/The_Hobbit",
        publisher: "Houghton Mifflin",
        description: "In a hole in the ground there lived a hobbit.",
        categories: &["Fiction", "Fantasy"],
        average_rating: 4.0,
        language: "en",
        cover_id: 6_979_861,
    },
    FixtureBook {
        title: "Good Omens",
        subtitle: Some("The Nice and Accurate Prophecies of Agnes Nutter, Witch"),
        authors: &["Terry Pratchett", "Neil Gaiman"],
        first_publish_year: 1990,
        published: "2006-11-28",
        publish_date_text: "28 November 2006",
        isbn13: "9780060853983",
        isbn10: "0060853980",
        google_id: "bU3ZQwAACAAJ",
        work_key: "/works/OL453936W",
        edition_url: "https://openlibrary.org/books/OL7937541M/Good_Omens",
        publisher: "William Morrow",
        description: "The world will end on a Saturday. Next Saturday, in fact.",
        categories: &["Fiction", "Humor"],
        average_rating: 4.5,
        language: "en",
        cover_id: 8_231_856,
    },
    FixtureBook {
        title: "War and Peace",
        subtitle: None,
        authors: &["Leo Tolstoy"],
        first_publish_year: 1869,
        published: "2008",
        publish_date_text: "2008",
        isbn13: "9781400079988",
        isbn10: "1400079985",
        google_id: "c4HEAN-ti1MC",
        work_key: "/works/OL267096W",
        edition_url: "https://openlibrary.org/books/OL9379213M/War_and_Peace",
        publisher: "Vintage",
        description: "Tolstoy's epic of Russian society during the Napoleonic era.",
        categories: &["Fiction", "Classics"],
        average_rating: 4.0,
        language: "en",
        cover_id: 7_131_424,
    },
];

/// Books whose ISBN-10 or ISBN-13 equals the normalized `isbn`.
pub fn by_isbn(isbn: &str) -> impl Iterator<Item = &'static FixtureBook> + '_ {
    BOOKS
        .iter()
        .filter(move |b| b.isbn13 == isbn || b.isbn10 == isbn)
}

/// Books sharing at least one title word with `title` and, when given, an author word.
pub fn by_title_author<'a>(
    title: &'a str,
    author: Option<&'a str>,
) -> impl Iterator<Item = &'static FixtureBook> + 'a {
    BOOKS.iter().filter(move |b| {
        shares_word(b.title, title)
            && author.is_none_or(|a| b.authors.iter().any(|ba| shares_word(ba, a)))
    })
}

fn shares_word(haystack: &str, needle: &str) -> bool {
    let words = |s: &str| -> Vec<String> {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() > 2)
            .map(str::to_lowercase)
            .collect()
    };
    let hay = words(haystack);
    words(needle).iter().any(|w| hay.contains(w))
}
