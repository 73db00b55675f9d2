//! ASCII motifs shown on the loading screen.

pub const MOTIFS: [&str; 8] = [
    r"
    ( (
     ) )
  ........
  |      |]
  \      /
   `----'",
    r"
      /\
     /  \
    /    \
   /______\
     |  |",
    r"
   .-.
  (o o)
  | O \
   \   \
    `~~~'",
    r"
    _______
   |.-----.|
   ||     ||
   ||_____||
   `-------'",
    r"
      *
     ***
    *****
   *******
     | |",
    r"
   ><(((('>
        ><(((('>
   ><(((('>",
    r"
    .--.
   |o_o |
   |:_/ |
  //   \ \
 (|     | )
/'\_   _/`\
\___)=(___/",
    r"
  _   _
 ( \_/ )
  \   /
   \ /
    V",
];
