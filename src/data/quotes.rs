//! Built-in quote table used when the remote service is unavailable
//!
//! The table is compiled in and never changes at runtime, so the fallback
//! for a given day is the same on every machine.

use rand::Rng;

use super::{DayKey, Quote};

/// A quote stored in the static table
///
/// Uses `&'static str` fields so the table can be a plain static array.
/// Convert with [`StaticQuote::to_quote`] before handing it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticQuote {
    pub text: &'static str,
    pub author: &'static str,
}

impl StaticQuote {
    pub fn to_quote(&self) -> Quote {
        Quote {
            text: self.text.to_string(),
            author: self.author.to_string(),
        }
    }
}

const fn q(text: &'static str, author: &'static str) -> StaticQuote {
    StaticQuote { text, author }
}

/// The built-in quotes, in fallback index order
pub static QUOTES: [StaticQuote; 35] = [
    q("The present moment always will have been.", "Unknown"),
    q(
        "Do not go where the path may lead, go instead where there is no path and leave a trail.",
        "Ralph Waldo Emerson",
    ),
    q("In the middle of difficulty lies opportunity.", "Albert Einstein"),
    q("It does not matter how slowly you go as long as you do not stop.", "Confucius"),
    q("Everything you've ever wanted is on the other side of fear.", "George Addair"),
    q("Start where you are. Use what you have. Do what you can.", "Arthur Ashe"),
    q("Act as if what you do makes a difference. It does.", "William James"),
    q("You are never too old to set another goal or to dream a new dream.", "C.S. Lewis"),
    q("The only way to do great work is to love what you do.", "Steve Jobs"),
    q("Life is what happens when you're busy making other plans.", "John Lennon"),
    q(
        "Don't judge each day by the harvest you reap but by the seeds that you plant.",
        "Robert Louis Stevenson",
    ),
    q(
        "The future belongs to those who believe in the beauty of their dreams.",
        "Eleanor Roosevelt",
    ),
    q(
        "The best time to plant a tree was 20 years ago. The second best time is now.",
        "Chinese Proverb",
    ),
    q("An unexamined life is not worth living.", "Socrates"),
    q("You miss 100% of the shots you don't take.", "Wayne Gretzky"),
    q("I have not failed. I've just found 10,000 ways that won't work.", "Thomas Edison"),
    q("The journey of a thousand miles begins with one step.", "Lao Tzu"),
    q("That which does not kill us makes us stronger.", "Friedrich Nietzsche"),
    q("Life isn't about finding yourself. Life is about creating yourself.", "George Bernard Shaw"),
    q(
        "In three words I can sum up everything I've learned about life: it goes on.",
        "Robert Frost",
    ),
    q("No act of kindness, no matter how small, is ever wasted.", "Aesop"),
    q("Go confidently in the direction of your dreams!", "Henry David Thoreau"),
    q("The secret of getting ahead is getting started.", "Mark Twain"),
    q("The mind is everything. What you think you become.", "Buddha"),
    q("It is during our darkest moments that we must focus to see the light.", "Aristotle"),
    q("Whoever is happy will make others happy too.", "Anne Frank"),
    q("We become what we think about.", "Earl Nightingale"),
    q("He who has a why to live can bear almost any how.", "Friedrich Nietzsche"),
    q(
        "Perfection is not attainable, but if we chase perfection we can catch excellence.",
        "Vince Lombardi",
    ),
    q("Motivation is what gets you started. Habit is what keeps you going.", "Jim Ryun"),
    q("Believe you can and you're halfway there.", "Theodore Roosevelt"),
    q(
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "Winston Churchill",
    ),
    q("Not all those who wander are lost.", "J.R.R. Tolkien"),
    q("Darkness cannot drive out darkness; only light can do that.", "Martin Luther King Jr."),
    q(
        "Life is not measured by the number of breaths we take, but by the moments that take our breath away.",
        "Maya Angelou",
    ),
];

/// Index into [`QUOTES`] for a given day
pub fn fallback_index(day: DayKey) -> usize {
    day.as_number().rem_euclid(QUOTES.len() as i64) as usize
}

/// The offline quote for `day`
///
/// Pure function of the day key: the same day always yields the same quote.
pub fn fallback_quote(day: DayKey) -> Quote {
    QUOTES[fallback_index(day)].to_quote()
}

/// A uniformly random quote from the table, for previews
pub fn random_quote() -> Quote {
    let index = rand::rng().random_range(0..QUOTES.len());
    QUOTES[index].to_quote()
}
