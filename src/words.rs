//! Word categories and the word source the engine draws secret words from.

use crate::types::Category;
use rand::{Rng, RngCore};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors that can occur while building a word bank
#[derive(Debug, thiserror::Error)]
pub enum WordBankError {
    #[error("Failed to read word file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Word file parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Category '{0}' has no words")]
    EmptyCategory(Category),

    #[error("Word bank has no categories")]
    NoCategories,
}

/// Supplies secret words to the engine
pub trait WordSource: Send + Sync {
    /// Uniform draw from the named category, or from the union of all
    /// categories when `category` is `None`. Returns `None` for an unknown category.
    fn random_word(&self, category: Option<&str>, rng: &mut dyn RngCore) -> Option<String>;

    /// Category identifiers in display order
    fn categories(&self) -> Vec<Category>;

    fn has_category(&self, category: &str) -> bool {
        self.categories().iter().any(|c| c == category)
    }
}

/// Built-in category lists
const BUILTIN_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "animals",
        &[
            "dog", "cat", "elephant", "lion", "tiger", "bear", "wolf", "fox", "deer", "rabbit",
            "mouse", "hamster", "horse", "cow", "pig", "sheep", "goat", "zebra", "giraffe",
            "hippo", "gorilla", "monkey", "kangaroo", "koala", "panda", "dolphin", "whale",
            "shark", "octopus", "crab", "lobster", "snail", "spider", "ant", "bee", "butterfly",
            "frog", "snake", "turtle", "eagle", "owl", "crow", "pigeon", "parrot", "duck",
            "chicken", "penguin", "bat", "skunk", "raccoon", "moose", "camel", "llama", "cheetah",
            "seal", "walrus", "jellyfish", "starfish",
        ],
    ),
    (
        "food",
        &[
            "pizza", "burger", "sandwich", "taco", "pasta", "steak", "chicken", "fish", "bacon",
            "ham", "bread", "toast", "bagel", "muffin", "donut", "pancake", "waffle", "cereal",
            "rice", "noodles", "soup", "salad", "fries", "chips", "popcorn", "apple", "banana",
            "orange", "grape", "strawberry", "cherry", "peach", "mango", "pineapple", "watermelon",
            "kiwi", "lemon", "potato", "carrot", "broccoli", "lettuce", "cucumber", "pepper",
            "onion", "mushroom", "corn", "peas", "beans", "egg", "cheese", "butter", "milk",
            "yogurt", "ice cream", "cake", "pie", "cookie", "candy", "chocolate", "honey",
            "peanut butter", "ketchup", "mustard", "juice", "soda", "water",
        ],
    ),
    (
        "home",
        &[
            "chair", "table", "desk", "couch", "bed", "pillow", "blanket", "lamp", "clock",
            "mirror", "carpet", "curtain", "shelf", "drawer", "closet", "door", "window", "wall",
            "floor", "roof", "stairs", "sink", "toilet", "bathtub", "shower", "towel", "soap",
            "toothbrush", "comb", "vacuum", "broom", "mop", "trash can", "refrigerator", "oven",
            "stove", "microwave", "toaster", "blender", "pot", "pan", "bowl", "plate", "cup",
            "fork", "knife", "spoon", "napkin", "remote", "television", "computer", "phone",
            "charger", "speaker", "headphones",
        ],
    ),
    (
        "clothes",
        &[
            "shirt", "pants", "jeans", "shorts", "skirt", "dress", "sweater", "jacket", "coat",
            "hoodie", "socks", "shoes", "boots", "sneakers", "sandals", "slippers", "hat", "cap",
            "scarf", "gloves", "belt", "tie", "pajamas", "swimsuit", "uniform", "raincoat", "vest",
            "zipper", "button", "pocket",
        ],
    ),
    (
        "vehicles",
        &[
            "car", "truck", "van", "bus", "taxi", "motorcycle", "bicycle", "scooter", "skateboard",
            "ambulance", "fire truck", "police car", "tractor", "train", "subway", "airplane",
            "helicopter", "rocket", "boat", "ship", "sailboat", "canoe", "kayak", "submarine",
            "jet ski", "sled",
        ],
    ),
    (
        "places",
        &[
            "house", "apartment", "cabin", "castle", "tent", "hotel", "beach", "mountain",
            "forest", "desert", "farm", "park", "playground", "zoo", "museum", "library", "school",
            "hospital", "restaurant", "mall", "store", "market", "bakery", "bank", "post office",
            "police station", "fire station", "airport", "train station", "gas station",
            "movie theater", "stadium", "gym", "pool", "church", "lake", "river", "waterfall",
            "ocean", "island", "cave", "bridge",
        ],
    ),
    (
        "sports",
        &[
            "soccer", "football", "basketball", "baseball", "tennis", "volleyball", "hockey",
            "golf", "bowling", "boxing", "wrestling", "karate", "skiing", "snowboarding",
            "ice skating", "swimming", "diving", "surfing", "fishing", "running", "hiking",
            "camping", "gymnastics", "cheerleading", "skateboarding", "rock climbing", "yoga",
            "dance", "biking",
        ],
    ),
    (
        "music",
        &[
            "piano", "guitar", "drums", "violin", "flute", "trumpet", "saxophone", "harmonica",
            "microphone", "speaker", "headphones", "radio", "song", "singer", "band", "concert",
            "dance",
        ],
    ),
    (
        "tools",
        &[
            "hammer", "screwdriver", "wrench", "drill", "saw", "ladder", "ruler", "tape",
            "scissors", "shovel", "rake", "axe", "nail", "screw", "glue", "paintbrush", "bucket",
            "rope", "flashlight",
        ],
    ),
    (
        "nature",
        &[
            "tree", "bush", "grass", "flower", "rose", "daisy", "sunflower", "leaf", "branch",
            "stick", "acorn", "seed", "mushroom", "rock", "stone", "sand", "dirt", "mud", "sun",
            "moon", "star", "cloud", "rain", "snow", "ice", "rainbow", "lightning", "thunder",
            "wind", "tornado",
        ],
    ),
    (
        "body",
        &[
            "head", "face", "eye", "nose", "ear", "mouth", "tongue", "tooth", "chin", "neck",
            "shoulder", "arm", "elbow", "wrist", "hand", "finger", "thumb", "chest", "stomach",
            "back", "leg", "knee", "ankle", "foot", "toe", "hair", "skin", "bone", "muscle",
            "heart", "brain",
        ],
    ),
    (
        "jobs",
        &[
            "doctor", "nurse", "dentist", "teacher", "principal", "police officer", "firefighter",
            "chef", "waiter", "farmer", "driver", "pilot", "soldier", "singer", "actor", "artist",
            "writer", "builder", "plumber", "mechanic", "barber", "coach", "lifeguard", "vet",
        ],
    ),
    (
        "school",
        &[
            "classroom", "desk", "chair", "whiteboard", "computer", "tablet", "textbook",
            "notebook", "binder", "folder", "paper", "pencil", "pen", "eraser", "marker", "crayon",
            "scissors", "glue", "tape", "ruler", "calculator", "backpack", "lunchbox", "locker",
            "hallway", "cafeteria", "gym", "playground", "homework", "test", "grade", "recess",
        ],
    ),
    (
        "toys",
        &[
            "ball", "balloon", "kite", "doll", "teddy bear", "action figure", "puzzle", "blocks",
            "legos", "train set", "race car", "robot", "board game", "card game", "video game",
            "jump rope", "hula hoop", "swing", "slide", "trampoline", "bubbles", "chalk",
            "stickers", "playdough", "slime", "yo-yo", "frisbee", "nerf gun", "water gun",
        ],
    ),
    (
        "colors",
        &[
            "red", "orange", "yellow", "green", "blue", "purple", "pink", "brown", "black",
            "white", "gray", "gold", "silver", "tan", "turquoise", "navy", "maroon", "peach",
        ],
    ),
    (
        "shapes",
        &[
            "circle", "square", "triangle", "rectangle", "oval", "diamond", "star", "heart",
            "arrow", "line", "dot", "spiral", "cube", "sphere", "cone", "cylinder",
        ],
    ),
    (
        "weather",
        &[
            "sun", "sunshine", "cloud", "rain", "storm", "thunder", "lightning", "rainbow", "snow",
            "snowflake", "hail", "ice", "frost", "wind", "breeze", "fog", "tornado", "hurricane",
            "hot", "warm", "cold", "freezing", "spring", "summer", "fall", "winter",
        ],
    ),
    (
        "fantasy",
        &[
            "dragon", "unicorn", "mermaid", "fairy", "elf", "troll", "giant", "ghost", "vampire",
            "zombie", "witch", "wizard", "knight", "king", "queen", "prince", "princess", "castle",
            "crown", "sword", "shield", "wand", "spell", "magic", "treasure", "monster",
            "superhero",
        ],
    ),
    (
        "feelings",
        &[
            "happy", "sad", "angry", "scared", "surprised", "confused", "excited", "nervous",
            "calm", "tired", "bored", "silly", "proud", "shy", "brave", "lonely", "jealous",
            "worried", "love",
        ],
    ),
    (
        "actions",
        &[
            "run", "walk", "jump", "skip", "hop", "crawl", "climb", "swim", "fly", "sit", "stand",
            "push", "pull", "throw", "catch", "kick", "hit", "eat", "drink", "sleep", "wake",
            "cry", "laugh", "smile", "yell", "whisper", "sing", "dance", "read", "write", "draw",
            "paint",
        ],
    ),
    (
        "time",
        &[
            "second", "minute", "hour", "day", "week", "month", "year", "morning", "afternoon",
            "evening", "night", "today", "tomorrow", "yesterday", "weekend", "birthday", "holiday",
            "clock", "watch", "alarm", "calendar",
        ],
    ),
    (
        "sounds",
        &[
            "bang", "boom", "crash", "buzz", "hum", "pop", "snap", "click", "splash", "drip",
            "roar", "bark", "meow", "chirp", "beep", "honk", "bell", "whistle", "drum", "ring",
        ],
    ),
];

/// In-memory word bank keyed by category
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<(Category, Vec<String>)>,
}

impl WordBank {
    /// Build a bank from category lists. Words are trimmed and blanks dropped;
    /// a category left without words is rejected.
    pub fn new(categories: Vec<(Category, Vec<String>)>) -> Result<Self, WordBankError> {
        if categories.is_empty() {
            return Err(WordBankError::NoCategories);
        }

        let mut cleaned = Vec::with_capacity(categories.len());
        for (name, words) in categories {
            let name = name.trim().to_lowercase();
            let words: Vec<String> = words
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                return Err(WordBankError::EmptyCategory(name));
            }
            cleaned.push((name, words));
        }

        Ok(Self {
            categories: cleaned,
        })
    }

    /// The fixed word lists shipped with the game
    pub fn builtin() -> Self {
        Self {
            categories: BUILTIN_CATEGORIES
                .iter()
                .map(|(name, words)| {
                    (
                        name.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
        }
    }

    /// Parse a JSON object mapping category names to word arrays
    pub fn from_json(json: &str) -> Result<Self, WordBankError> {
        let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::new(parsed.into_iter().collect())
    }

    pub async fn load(path: &Path) -> Result<Self, WordBankError> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn words(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, words)| words.as_slice())
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|(_, words)| words.len()).sum()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::builtin()
    }
}

impl WordSource for WordBank {
    fn random_word(&self, category: Option<&str>, rng: &mut dyn RngCore) -> Option<String> {
        match category {
            Some(category) => {
                let words = self.words(category)?;
                words.get(rng.random_range(0..words.len())).cloned()
            }
            None => {
                // Index into the flattened pool so every entry is equally likely
                let total = self.word_count();
                if total == 0 {
                    return None;
                }
                let mut index = rng.random_range(0..total);
                for (_, words) in &self.categories {
                    if index < words.len() {
                        return Some(words[index].clone());
                    }
                    index -= words.len();
                }
                None
            }
        }
    }

    fn categories(&self) -> Vec<Category> {
        self.categories.iter().map(|(name, _)| name.clone()).collect()
    }
}

/// Capitalized category name for display
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
