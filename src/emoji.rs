//! Emoji shortcode table.
//!
//! Fixed name → glyph mapping consulted by the `Emojis` inline handler.
//! Unknown shortcodes are not an error; the handler simply declines the
//! match and the colon stays literal.

use phf::phf_map;

static EMOJI_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "smile" => "😄", "laughing" => "😆", "blush" => "😊", "smiley" => "😃",
    "relaxed" => "☺️", "smirk" => "😏", "heart_eyes" => "😍", "kissing_heart" => "😘",
    "kissing_closed_eyes" => "😚", "flushed" => "😳", "relieved" => "😌", "satisfied" => "😆",
    "grin" => "😁", "wink" => "😉", "stuck_out_tongue_winking_eye" => "😜",
    "stuck_out_tongue_closed_eyes" => "😝", "grinning" => "😀", "kissing" => "😗",
    "kissing_smiling_eyes" => "😙", "stuck_out_tongue" => "😛", "sleeping" => "😴",
    "worried" => "😟", "frowning" => "😦", "anguished" => "😧", "open_mouth" => "😮",
    "grimacing" => "😬", "confused" => "😕", "hushed" => "😯", "expressionless" => "😑",
    "unamused" => "😒", "sweat_smile" => "😅", "sweat" => "😓",
    "disappointed_relieved" => "😥", "weary" => "😩", "pensive" => "😔",
    "disappointed" => "😞", "confounded" => "😖", "fearful" => "😨", "cold_sweat" => "😰",
    "persevere" => "😣", "cry" => "😢", "sob" => "😭", "joy" => "😂", "astonished" => "😲",
    "scream" => "😱", "tired_face" => "😫", "angry" => "😠", "rage" => "😡",
    "triumph" => "😤", "sleepy" => "😪", "yum" => "😋", "mask" => "😷",
    "sunglasses" => "😎", "dizzy_face" => "😵", "imp" => "👿", "smiling_imp" => "😈",
    "neutral_face" => "😐", "no_mouth" => "😶", "innocent" => "😇", "alien" => "👽",
    "yellow_heart" => "💛", "blue_heart" => "💙", "purple_heart" => "💜", "heart" => "❤️",
    "green_heart" => "💚", "broken_heart" => "💔", "heartbeat" => "💓", "heartpulse" => "💗",
    "two_hearts" => "💕", "revolving_hearts" => "💞", "cupid" => "💘",
    "sparkling_heart" => "💖", "sparkles" => "✨", "star" => "⭐️", "star2" => "🌟",
    "dizzy" => "💫", "boom" => "💥", "collision" => "💥", "anger" => "💢",
    "exclamation" => "❗️", "question" => "❓", "grey_exclamation" => "❕",
    "grey_question" => "❔", "zzz" => "💤", "dash" => "💨", "sweat_drops" => "💦",
    "notes" => "🎶", "musical_note" => "🎵", "fire" => "🔥", "hankey" => "💩",
    "poop" => "💩", "shit" => "💩", "+1" => "👍", "thumbsup" => "👍", "-1" => "👎",
    "thumbsdown" => "👎", "ok_hand" => "👌", "punch" => "👊", "facepunch" => "👊",
    "fist" => "✊", "v" => "✌️", "wave" => "👋", "hand" => "✋", "raised_hand" => "✋",
    "open_hands" => "👐", "point_up" => "☝️", "point_down" => "👇", "point_left" => "👈",
    "point_right" => "👉", "raised_hands" => "🙌", "pray" => "🙏", "point_up_2" => "👆",
    "clap" => "👏", "muscle" => "💪", "metal" => "🤘", "walking" => "🚶",
    "runner" => "🏃", "running" => "🏃", "couple" => "👫", "family" => "👪",
    "dancer" => "💃", "dancers" => "👯", "ok_woman" => "🙆", "no_good" => "🙅",
    "information_desk_person" => "💁", "raising_hand" => "🙋", "bow" => "🙇",
    "couple_with_heart" => "💑", "massage" => "💆", "haircut" => "💇", "nail_care" => "💅",
    "boy" => "👦", "girl" => "👧", "woman" => "👩", "man" => "👨", "baby" => "👶",
    "older_woman" => "👵", "older_man" => "👴", "construction_worker" => "👷",
    "cop" => "👮", "angel" => "👼", "princess" => "👸", "smiley_cat" => "😺",
    "smile_cat" => "😸", "heart_eyes_cat" => "😻", "kissing_cat" => "😽",
    "smirk_cat" => "😼", "scream_cat" => "🙀", "crying_cat_face" => "😿",
    "joy_cat" => "😹", "pouting_cat" => "😾", "japanese_ogre" => "👹",
    "japanese_goblin" => "👺", "see_no_evil" => "🙈", "hear_no_evil" => "🙉",
    "speak_no_evil" => "🙊", "guardsman" => "💂", "skull" => "💀", "feet" => "🐾",
    "lips" => "👄", "kiss" => "💋", "droplet" => "💧", "ear" => "👂", "eyes" => "👀",
    "nose" => "👃", "tongue" => "👅", "love_letter" => "💌",
    "bust_in_silhouette" => "👤", "busts_in_silhouette" => "👥",
    "speech_balloon" => "💬", "thought_balloon" => "💭", "sunny" => "☀️",
    "umbrella" => "☔️", "cloud" => "☁️", "snowflake" => "❄️", "snowman" => "⛄️",
    "zap" => "⚡️", "cyclone" => "🌀", "foggy" => "🌁", "ocean" => "🌊", "cat" => "🐱",
    "dog" => "🐶", "mouse" => "🐭", "hamster" => "🐹", "rabbit" => "🐰", "wolf" => "🐺",
    "frog" => "🐸", "tiger" => "🐯", "koala" => "🐨", "bear" => "🐻", "pig" => "🐷",
    "pig_nose" => "🐽", "cow" => "🐮", "boar" => "🐗", "monkey_face" => "🐵",
    "monkey" => "🐒", "horse" => "🐴", "racehorse" => "🐎", "camel" => "🐫",
    "sheep" => "🐑", "elephant" => "🐘", "panda_face" => "🐼", "snake" => "🐍",
    "bird" => "🐦", "baby_chick" => "🐤", "hatched_chick" => "🐥",
    "hatching_chick" => "🐣", "chicken" => "🐔", "penguin" => "🐧", "turtle" => "🐢",
    "bug" => "🐛", "honeybee" => "🐝", "ant" => "🐜", "beetle" => "🐞", "snail" => "🐌",
    "octopus" => "🐙", "tropical_fish" => "🐠", "fish" => "🐟", "whale" => "🐳",
    "whale2" => "🐋", "dolphin" => "🐬", "dragon" => "🐉", "goat" => "🐐",
    "rooster" => "🐓", "dragon_face" => "🐲", "blowfish" => "🐡", "crocodile" => "🐊",
    "leopard" => "🐆", "poodle" => "🐩", "crab" => "🦀", "paw_prints" => "🐾",
    "bouquet" => "💐", "cherry_blossom" => "🌸", "tulip" => "🌷",
    "four_leaf_clover" => "🍀", "rose" => "🌹", "sunflower" => "🌻", "hibiscus" => "🌺",
    "maple_leaf" => "🍁", "leaves" => "🍃", "fallen_leaf" => "🍂", "herb" => "🌿",
    "mushroom" => "🍄", "cactus" => "🌵", "palm_tree" => "🌴", "evergreen_tree" => "🌲",
    "deciduous_tree" => "🌳", "chestnut" => "🌰", "seedling" => "🌱", "blossom" => "🌼",
    "shell" => "🐚", "globe_with_meridians" => "🌐", "sun_with_face" => "🌞",
    "full_moon" => "🌕", "new_moon" => "🌑", "moon" => "🌔", "earth_africa" => "🌍",
    "earth_americas" => "🌎", "earth_asia" => "🌏", "volcano" => "🌋",
    "milky_way" => "🌌", "partly_sunny" => "⛅️", "bamboo" => "🎍", "gift_heart" => "💝",
    "jack_o_lantern" => "🎃", "ghost" => "👻", "santa" => "🎅", "christmas_tree" => "🎄",
    "gift" => "🎁", "bell" => "🔔", "no_bell" => "🔕", "tada" => "🎉",
    "confetti_ball" => "🎊", "balloon" => "🎈", "crystal_ball" => "🔮", "cd" => "💿",
    "dvd" => "📀", "floppy_disk" => "💾", "camera" => "📷", "video_camera" => "📹",
    "movie_camera" => "🎥", "computer" => "💻", "tv" => "📺", "iphone" => "📱",
    "phone" => "☎️", "telephone" => "☎️", "telephone_receiver" => "📞", "pager" => "📟",
    "fax" => "📠", "sound" => "🔉", "speaker" => "🔈", "mute" => "🔇",
    "loudspeaker" => "📢", "mega" => "📣", "hourglass" => "⌛️", "alarm_clock" => "⏰",
    "watch" => "⌚️", "radio" => "📻", "satellite" => "📡", "loop" => "➿",
    "mag" => "🔍", "mag_right" => "🔎", "unlock" => "🔓", "lock" => "🔒", "key" => "🔑",
    "bulb" => "💡", "flashlight" => "🔦", "electric_plug" => "🔌", "battery" => "🔋",
    "calling" => "📲", "email" => "✉️", "mailbox" => "📫", "postbox" => "📮",
    "bath" => "🛀", "shower" => "🚿", "toilet" => "🚽", "wrench" => "🔧",
    "nut_and_bolt" => "🔩", "hammer" => "🔨", "seat" => "💺", "moneybag" => "💰",
    "yen" => "💴", "dollar" => "💵", "pound" => "💷", "euro" => "💶",
    "credit_card" => "💳", "money_with_wings" => "💸", "e-mail" => "📧",
    "inbox_tray" => "📥", "outbox_tray" => "📤", "envelope" => "✉️", "door" => "🚪",
    "smoking" => "🚬", "bomb" => "💣", "gun" => "🔫", "pill" => "💊", "syringe" => "💉",
    "page_facing_up" => "📄", "bar_chart" => "📊", "chart_with_upwards_trend" => "📈",
    "chart_with_downwards_trend" => "📉", "scroll" => "📜", "clipboard" => "📋",
    "calendar" => "📆", "date" => "📅", "card_index" => "📇", "file_folder" => "📁",
    "open_file_folder" => "📂", "scissors" => "✂️", "pushpin" => "📌",
    "paperclip" => "📎", "black_nib" => "✒️", "pencil2" => "✏️",
    "straight_ruler" => "📏", "triangular_ruler" => "📐", "closed_book" => "📕",
    "green_book" => "📗", "blue_book" => "📘", "orange_book" => "📙",
    "notebook" => "📓", "ledger" => "📒", "books" => "📚", "bookmark" => "🔖",
    "name_badge" => "📛", "microscope" => "🔬", "telescope" => "🔭",
    "newspaper" => "📰", "football" => "🏈", "basketball" => "🏀", "soccer" => "⚽️",
    "baseball" => "⚾️", "tennis" => "🎾", "8ball" => "🎱", "bowling" => "🎳",
    "golf" => "⛳️", "bicyclist" => "🚴", "snowboarder" => "🏂", "swimmer" => "🏊",
    "surfer" => "🏄", "ski" => "🎿", "spades" => "♠️", "hearts" => "♥️",
    "clubs" => "♣️", "diamonds" => "♦️", "gem" => "💎", "ring" => "💍",
    "trophy" => "🏆", "musical_score" => "🎼", "musical_keyboard" => "🎹",
    "violin" => "🎻", "space_invader" => "👾", "video_game" => "🎮",
    "black_joker" => "🃏", "game_die" => "🎲", "dart" => "🎯", "mahjong" => "🀄️",
    "clapper" => "🎬", "memo" => "📝", "pencil" => "📝", "book" => "📖",
    "art" => "🎨", "microphone" => "🎤", "headphones" => "🎧", "trumpet" => "🎺",
    "saxophone" => "🎷", "guitar" => "🎸", "shoe" => "👞", "sandal" => "👡",
    "high_heel" => "👠", "lipstick" => "💄", "boot" => "👢", "shirt" => "👕",
    "tshirt" => "👕", "necktie" => "👔", "dress" => "👗", "jeans" => "👖",
    "kimono" => "👘", "bikini" => "👙", "ribbon" => "🎀", "tophat" => "🎩",
    "crown" => "👑", "womans_hat" => "👒", "closed_umbrella" => "🌂",
    "briefcase" => "💼", "handbag" => "👜", "pouch" => "👝", "purse" => "👛",
    "eyeglasses" => "👓", "coffee" => "☕️", "tea" => "🍵", "sake" => "🍶",
    "baby_bottle" => "🍼", "beer" => "🍺", "beers" => "🍻", "cocktail" => "🍸",
    "tropical_drink" => "🍹", "wine_glass" => "🍷", "fork_and_knife" => "🍴",
    "pizza" => "🍕", "hamburger" => "🍔", "fries" => "🍟", "poultry_leg" => "🍗",
    "meat_on_bone" => "🍖", "spaghetti" => "🍝", "curry" => "🍛", "bento" => "🍱",
    "sushi" => "🍣", "rice_ball" => "🍙", "rice" => "🍚", "ramen" => "🍜",
    "stew" => "🍲", "egg" => "🥚", "bread" => "🍞", "doughnut" => "🍩",
    "custard" => "🍮", "icecream" => "🍦", "ice_cream" => "🍨", "shaved_ice" => "🍧",
    "birthday" => "🎂", "cake" => "🍰", "cookie" => "🍪", "chocolate_bar" => "🍫",
    "candy" => "🍬", "lollipop" => "🍭", "honey_pot" => "🍯", "apple" => "🍎",
    "green_apple" => "🍏", "tangerine" => "🍊", "lemon" => "🍋", "cherries" => "🍒",
    "grapes" => "🍇", "watermelon" => "🍉", "strawberry" => "🍓", "peach" => "🍑",
    "melon" => "🍈", "banana" => "🍌", "pear" => "🍐", "pineapple" => "🍍",
    "sweet_potato" => "🍠", "eggplant" => "🍆", "tomato" => "🍅", "corn" => "🌽",
    "house" => "🏠", "house_with_garden" => "🏡", "school" => "🏫", "office" => "🏢",
    "hospital" => "🏥", "bank" => "🏦", "hotel" => "🏨", "wedding" => "💒",
    "church" => "⛪️", "department_store" => "🏬", "city_sunrise" => "🌇",
    "city_sunset" => "🌆", "japanese_castle" => "🏯", "european_castle" => "🏰",
    "tent" => "⛺️", "factory" => "🏭", "tokyo_tower" => "🗼", "japan" => "🗾",
    "mount_fuji" => "🗻", "sunrise" => "🌅", "stars" => "🌠",
    "statue_of_liberty" => "🗽", "bridge_at_night" => "🌉", "carousel_horse" => "🎠",
    "rainbow" => "🌈", "ferris_wheel" => "🎡", "fountain" => "⛲️",
    "roller_coaster" => "🎢", "ship" => "🚢", "speedboat" => "🚤", "boat" => "⛵️",
    "sailboat" => "⛵️", "rowboat" => "🚣", "anchor" => "⚓️", "rocket" => "🚀",
    "airplane" => "✈️", "helicopter" => "🚁", "steam_locomotive" => "🚂",
    "tram" => "🚊", "bike" => "🚲", "tractor" => "🚜", "blue_car" => "🚙",
    "car" => "🚗", "red_car" => "🚗", "taxi" => "🚕", "articulated_lorry" => "🚛",
    "bus" => "🚌", "rotating_light" => "🚨", "police_car" => "🚓",
    "fire_engine" => "🚒", "ambulance" => "🚑", "minibus" => "🚐", "truck" => "🚚",
    "train" => "🚋", "station" => "🚉", "train2" => "🚆", "bullettrain_front" => "🚅",
    "bullettrain_side" => "🚄", "light_rail" => "🚈", "monorail" => "🚝",
    "railway_car" => "🚃", "trolleybus" => "🚎", "ticket" => "🎫",
    "fuelpump" => "⛽️", "vertical_traffic_light" => "🚦", "traffic_light" => "🚥",
    "warning" => "⚠️", "construction" => "🚧", "beginner" => "🔰", "atm" => "🏧",
    "slot_machine" => "🎰", "busstop" => "🚏", "barber" => "💈", "hotsprings" => "♨️",
    "checkered_flag" => "🏁", "crossed_flags" => "🎌", "izakaya_lantern" => "🏮",
    "moyai" => "🗿", "circus_tent" => "🎪", "performing_arts" => "🎭",
    "round_pushpin" => "📍", "triangular_flag_on_post" => "🚩", "jp" => "🇯🇵",
    "kr" => "🇰🇷", "cn" => "🇨🇳", "us" => "🇺🇸", "fr" => "🇫🇷", "es" => "🇪🇸",
    "it" => "🇮🇹", "ru" => "🇷🇺", "gb" => "🇬🇧", "uk" => "🇬🇧", "de" => "🇩🇪",
    "one" => "1️⃣", "two" => "2️⃣", "three" => "3️⃣", "four" => "4️⃣", "five" => "5️⃣",
    "six" => "6️⃣", "seven" => "7️⃣", "eight" => "8️⃣", "nine" => "9️⃣", "zero" => "0️⃣",
    "keycap_ten" => "🔟", "1234" => "🔢", "hash" => "#️⃣", "symbols" => "🔣",
    "arrow_backward" => "◀️", "arrow_down" => "⬇️", "arrow_forward" => "▶️",
    "arrow_left" => "⬅️", "arrow_right" => "➡️", "arrow_up" => "⬆️",
    "left_right_arrow" => "↔️", "arrow_up_down" => "↕️", "rewind" => "⏪",
    "fast_forward" => "⏩", "information_source" => "ℹ️", "ok" => "🆗",
    "twisted_rightwards_arrows" => "🔀", "repeat" => "🔁", "repeat_one" => "🔂",
    "new" => "🆕", "top" => "🔝", "up" => "🆙", "cool" => "🆒", "free" => "🆓",
    "ng" => "🆖", "cinema" => "🎦", "signal_strength" => "📶", "restroom" => "🚻",
    "mens" => "🚹", "womens" => "🚺", "baby_symbol" => "🚼", "no_smoking" => "🚭",
    "parking" => "🅿️", "wheelchair" => "♿️", "metro" => "🚇", "wc" => "🚾",
    "secret" => "㊙️", "congratulations" => "㊗️", "m" => "Ⓜ️", "cl" => "🆑",
    "sos" => "🆘", "id" => "🆔", "no_entry_sign" => "🚫", "underage" => "🔞",
    "no_entry" => "⛔️", "heart_decoration" => "💟", "vs" => "🆚",
    "vibration_mode" => "📳", "mobile_phone_off" => "📴", "chart" => "💹",
    "currency_exchange" => "💱", "aries" => "♈️", "taurus" => "♉️",
    "gemini" => "♊️", "cancer" => "♋️", "leo" => "♌️", "virgo" => "♍️",
    "libra" => "♎️", "scorpius" => "♏️", "sagittarius" => "♐️",
    "capricorn" => "♑️", "aquarius" => "♒️", "pisces" => "♓️",
    "six_pointed_star" => "🔯", "a" => "🅰️", "b" => "🅱️", "ab" => "🆎",
    "o2" => "🅾️", "recycle" => "♻️", "end" => "🔚", "on" => "🔛", "soon" => "🔜",
    "clock1" => "🕐", "clock2" => "🕑", "clock3" => "🕒", "clock4" => "🕓",
    "clock5" => "🕔", "clock6" => "🕕", "clock7" => "🕖", "clock8" => "🕗",
    "clock9" => "🕘", "clock10" => "🕙", "clock11" => "🕚", "clock12" => "🕛",
    "heavy_dollar_sign" => "💲", "copyright" => "©️", "registered" => "®️",
    "tm" => "™️", "x" => "❌", "heavy_exclamation_mark" => "❗️",
    "bangbang" => "‼️", "interrobang" => "⁉️", "o" => "⭕️",
    "heavy_multiplication_x" => "✖️", "heavy_plus_sign" => "➕",
    "heavy_minus_sign" => "➖", "heavy_division_sign" => "➗",
    "white_flower" => "💮", "100" => "💯", "heavy_check_mark" => "✔️",
    "ballot_box_with_check" => "☑️", "radio_button" => "🔘", "link" => "🔗",
    "curly_loop" => "➰", "wavy_dash" => "〰️", "trident" => "🔱",
    "white_check_mark" => "✅", "black_square_button" => "🔲",
    "white_square_button" => "🔳", "black_circle" => "⚫️", "white_circle" => "⚪️",
    "red_circle" => "🔴", "large_blue_circle" => "🔵", "large_blue_diamond" => "🔷",
    "large_orange_diamond" => "🔶", "small_blue_diamond" => "🔹",
    "small_orange_diamond" => "🔸", "small_red_triangle" => "🔺",
    "small_red_triangle_down" => "🔻", "black_large_square" => "⬛",
    "white_large_square" => "⬜",
};

/// Looks up a shortcode (without the surrounding colons).
pub fn lookup(name: &str) -> Option<&'static str> {
    EMOJI_MAP.get(name).copied()
}
