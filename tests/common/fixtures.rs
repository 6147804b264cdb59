use serde_json::{Value, json};

pub struct Fixtures;

impl Fixtures {
    pub fn movie(id: i64, title: &str, year: i32, rating: f64) -> Value {
        json!({
            "id": id,
            "canonical_key": format!("{}_{}", title.to_lowercase().replace(' ', "_"), year),
            "title": title,
            "release_year": year,
            "imdb_rating": rating,
            "genre": "Drama, Crime",
            "description": format!("{} is a film from {}.", title, year),
            "poster_url": null,
            "sources": ["netflix", "imdb"],
            "num_sources": 2,
            "netflix_id": format!("nf{}", id),
            "amazon_id": null,
            "imdb_id": format!("tt{:07}", id)
        })
    }

    pub fn movies_page(titles: &[&str], page: u32, total: u64, total_pages: u32) -> Value {
        let movies: Vec<Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Self::movie(i as i64 + 1, title, 1990 + i as i32, 8.0))
            .collect();
        json!({
            "success": true,
            "movies": movies,
            "total": total,
            "page": page,
            "per_page": 20,
            "total_pages": total_pages
        })
    }

    pub fn movie_detail(id: i64, title: &str) -> Value {
        let mut movie = Self::movie(id, title, 1995, 8.3);
        movie["imdb_votes"] = json!(700_000);
        movie["language"] = json!("English");
        movie["netflix_director"] = json!("Michael Mann");
        movie["netflix_cast"] = json!("Al Pacino, Robert De Niro");
        movie["netflix_duration"] = json!("170 min");
        json!({ "success": true, "movie": movie })
    }

    pub fn failure(message: &str) -> Value {
        json!({ "success": false, "error": message })
    }
}
