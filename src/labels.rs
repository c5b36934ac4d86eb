/// Produce classes in model output order.
pub const CLASS_LABELS: [&str; 55] = [
    "apple",
    "banana",
    "beetroot",
    "bell_pepper",
    "cabbage",
    "capsicum",
    "carrot",
    "cauliflower",
    "chilli_pepper",
    "corn",
    "cucumber",
    "eggplant",
    "garlic",
    "ginger",
    "grapes",
    "jalepeno",
    "kiwi",
    "lemon",
    "lettuce",
    "mango",
    "onion",
    "orange",
    "paprika",
    "pear",
    "peas",
    "pineapple",
    "pomegranate",
    "potato",
    "raddish",
    "soy_beans",
    "spinach",
    "sweetcorn",
    "sweetpotato",
    "tomato",
    "turnip",
    "watermelon",
    "apricot",
    "avocado",
    "broccoli",
    "brussels_sprouts",
    "celery",
    "cherries",
    "coconut",
    "fig",
    "green_beans",
    "leek",
    "lime",
    "mushroom",
    "okra",
    "peach",
    "plum",
    "pumpkin",
    "raspberry",
    "strawberry",
    "zucchini",
];

pub fn label_for(index: usize) -> Option<&'static str> {
    CLASS_LABELS.get(index).copied()
}
