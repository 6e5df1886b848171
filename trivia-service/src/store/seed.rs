//! Sample data for development stores

use crate::models::{Category, NewQuestion};

/// The six standard trivia categories, ids 1 through 6
pub fn categories() -> Vec<Category> {
    vec![
        Category::new(1, "Science"),
        Category::new(2, "Art"),
        Category::new(3, "Geography"),
        Category::new(4, "History"),
        Category::new(5, "Entertainment"),
        Category::new(6, "Sports"),
    ]
}

/// Sample questions spread across every category
pub fn questions() -> Vec<NewQuestion> {
    vec![
        NewQuestion::new("What is the heaviest organ in the human body?", "The Liver", "1", 4),
        NewQuestion::new("Who discovered penicillin?", "Alexander Fleming", "1", 3),
        NewQuestion::new("What is the chemical symbol for gold?", "Au", "1", 2),
        NewQuestion::new("Which planet is known as the Red Planet?", "Mars", "1", 1),
        NewQuestion::new(
            "Which Dutch painter cut off part of his own ear?",
            "Vincent van Gogh",
            "2",
            2,
        ),
        NewQuestion::new("Who painted the ceiling of the Sistine Chapel?", "Michelangelo", "2", 3),
        NewQuestion::new("In which museum does the Mona Lisa hang?", "The Louvre", "2", 2),
        NewQuestion::new("What is the largest lake in Africa?", "Lake Victoria", "3", 2),
        NewQuestion::new("What is the capital city of Australia?", "Canberra", "3", 3),
        NewQuestion::new("Which river flows through Baghdad?", "The Tigris", "3", 4),
        NewQuestion::new(
            "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
            "Maya Angelou",
            "4",
            2,
        ),
        NewQuestion::new("In which year did the Berlin Wall fall?", "1989", "4", 2),
        NewQuestion::new("Which boxer was originally named Cassius Clay?", "Muhammad Ali", "4", 1),
        NewQuestion::new(
            "What is the title of the 1990 fantasy film directed by Tim Burton \
             about a man with scissors for hands?",
            "Edward Scissorhands",
            "5",
            3,
        ),
        NewQuestion::new(
            "Which actor played Tony Stark in the Marvel films?",
            "Robert Downey Jr.",
            "5",
            1,
        ),
        NewQuestion::new("Which country won the first FIFA World Cup in 1930?", "Uruguay", "6", 3),
        NewQuestion::new("How many players does a volleyball team have on court?", "Six", "6", 2),
    ]
}
