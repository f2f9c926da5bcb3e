// ============================================================================
// Canned Reply Text
// ============================================================================

pub const SAY_MENU: &str = "For a command list please type & send-: menu?\nPlease include the question mark.";

pub const EMAIL_REMINDER: &str =
    "Please save your email address, by typing & sending-: update email: example@emailprovider.com";

pub const FIRST_CONTACT_GREETING: &str = "Hello there, I don't believe we've met before.";

pub const FIRST_CONTACT_WITH_COMMANDS: &str = "Hello there, looks like you already know your way around.";

pub const NO_COMMAND: &str = "Err:NC, Sorry I couldn't identify a command in your message.";

pub const COMMAND_FAILED: &str = "Err:CF, Something went wrong processing your request.";

pub const NO_CURRENT_ORDER: &str = "No current order.";

const QUERY_COMMANDS: &str = "menu? - Prints this menu.\n\
shop? - Prints the shop price list.\n\
userinfo? - Prints your user info.";

const UPDATE_COMMANDS: &str = "update email: newEmail\n\
update nickname: newNickname\n\
update social: newSocial\n\
update consent: yes/no";

const SHOP_COMMANDS: &str = "To save your order please type & send-: update order X:newAmount\n\
Where X is the item's price list number, item order not important.\n\
\n\
Options are picked as optionNumber x quantity, weights are a plain number:\n\
update order 1:2x3, 3:500\n\
\n\
To remove an item from your order, use-: update order X:0\n\
\n\
currentorder? - Prints your current pending order.\n\
To checkout type & send-: checkoutnow?";

/// Main command list. The report line is left out when reports are off.
pub fn main_menu(report_keyword: Option<&str>) -> String {
    let mut menu = String::from("Main Menu, command list:");
    if let Some(keyword) = report_keyword {
        menu.push_str(&format!(
            "\n\n{}: [address], tribe size, activity level, [current activity]\n_(with square brackets)_",
            keyword
        ));
    }
    menu.push_str(&format!("\n\n{}\n\n{}", QUERY_COMMANDS, UPDATE_COMMANDS));
    menu
}

pub fn shop_header() -> String {
    format!("Welcome to the shop,\n\n{}", SHOP_COMMANDS)
}
