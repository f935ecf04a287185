//! Genre catalogue offered by the filter bar
//!
//! The list endpoint accepts any genre string; these are the ones the
//! browser lets the user cycle through.

/// Genre used for the initial search
pub const DEFAULT_GENRE: &str = "Independent";

/// Minimum rating used for the initial search
pub const DEFAULT_MIN_RATING: f64 = 9.0;

/// All selectable genres, in display order
pub static GENRES: [&str; 25] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "History",
    "Horror",
    "Independent",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Short",
    "Sport",
    "Superhero",
    "Thriller",
    "War",
    "Western",
];

/// Get all selectable genres
pub fn all_genres() -> &'static [&'static str] {
    &GENRES
}

/// Look up a genre by name, ignoring ASCII case
///
/// Returns the catalogue spelling so the request always uses the canonical form.
///
/// # Example
///
/// ```
/// use beatvideo::data::genres::find_genre;
///
/// assert_eq!(find_genre("sci-fi"), Some("Sci-Fi"));
/// assert_eq!(find_genre("polka"), None);
/// ```
pub fn find_genre(name: &str) -> Option<&'static str> {
    let name = name.trim();
    GENRES
        .iter()
        .copied()
        .find(|genre| genre.eq_ignore_ascii_case(name))
}

/// Position of a genre in the catalogue
pub fn genre_index(name: &str) -> Option<usize> {
    let genre = find_genre(name)?;
    GENRES.iter().position(|g| *g == genre)
}
