//! Fixed product vocabulary.

/// Product names events are drawn from.
pub const PRODUCTS: &[&str] = &[
    "backpack", "blender", "book", "bottle", "camera", "candle", "chair", "charger", "clock",
    "coffee", "desk", "drone", "earbuds", "guitar", "hat", "headphones", "helmet", "jacket",
    "kettle", "keyboard", "lamp", "laptop", "mirror", "monitor", "mouse", "mug", "notebook",
    "pillow", "plant", "printer", "rug", "sandals", "scarf", "sneakers", "speaker", "sunglasses",
    "tablet", "tent", "toaster", "umbrella", "wallet", "watch",
];
