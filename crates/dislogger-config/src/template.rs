//! Default configuration written when no config file exists.

use serde_json::{Value, json};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "data/DisLogger/config.json";

/// The sample document users start from.
pub fn default_config() -> Value {
    json!({
        "server": {
            "id": "229390802344738817",
            "main_channel_id": "229391297754955797",
            "#info#": "### THE BOT TOKEN CAN ALSO BE GIVEN WITH THE DISCORD_TOKEN ENVIRONMENT VARIABLE. ###"
        },

        "monitors": {
            "ARPMonitor1": {
                "type": "ARPMonitor",
                "logger": "main",
                "config": {
                    "ip": "192.168.0.140"
                }
            },
            "ARPMonitorGui": {
                "type": "ARPMonitor",
                "logger": "main.test",
                "config": {
                    "ip": "10.60.9.128"
                }
            },
            "#info#": "### TYPES: ARPMonitor (ip), CPUMonitor and RAMMonitor (warn_threshold, interval_secs). ###"
        },

        "loggers": {
            "main": {
                "log_level": 20,
                "handlers": {
                    "handler1": "DiscordHandlerGeneral",
                    "handler2": "Console"
                }
            },
            "main.test": {
                "log_level": 20,
                "handlers": {
                    "handler1": "DiscordHandlerOtherChannel"
                }
            },
            "#infO#": "### HERE YOU SPECIFY THE LOGGER INSTANCES YOU WISH TO USE. A LOGGER CAN   ###",
            "#inf.#": "### INHERIT ANOTHER LOGGER. IT WORKS LIKE THIS: grandparent.parent.child  ###",
            "#infc#": "###  WHAT IT DOES IS IT THAT IF YOU LOG SOMETHING WITH THE CHILD LOGGER,  ###",
            "#infq#": "### IT WILL ALSO LOG USING ITS PARENTS. YOU ALSO SPECIFY THE INSTANCES OF ###",
            "#inf0#": "### HANDLERS YOU WISH TO USE FOR YOUR LOGGER. LEVELS: 10 DEBUG, 20 INFO, ###",
            "#info#": "###   30 WARNING, 40 ERROR, 50 CRITICAL. IF UNSURE, KEEP IT AT 20.       ###"
        },

        "handlers": {
            "DiscordHandlerGeneral": {
                "type": "DiscordHandler",
                "formatter": "Discord",
                "config": {
                    "log_level": 20,
                    "channel_id": "229391297754955797"
                }
            },
            "DiscordHandlerOtherChannel": {
                "type": "DiscordHandler",
                "formatter": "Discord",
                "config": {
                    "log_level": 20,
                    "channel_id": "233016092816048128"
                }
            },
            "Console": {
                "type": "StreamHandler",
                "formatter": "Main",
                "config": {
                    "log_level": 20,
                    "stream": "stdout"
                }
            },
            "#info#": "### HERE YOU SPECIFY THE HANDLER INSTANCES YOU WISH TO USE. THE TYPE IS ONE OF ###",
            "#infO#": "### StreamHandler, FileHandler, DiscordHandler OR SMSHandler. THE FORMATTER  ###",
            "#inf0#": "### IS THE NAME OF A FORMATTER INSTANCE. CONFIG HOLDS THE HANDLER ARGUMENTS. ###"
        },

        "formatters": {
            "Main": "[%(asctime)s] %(levelname)-8s->%(message)s",
            "Discord": "```Markdown\n<%(asctime)-23s> <%(levelname)s>\n%(message)s\n```",
            "SMS": "[%(asctime)s] %(levelname)-8s:\n%(message)s",
            "#info#": "### FIELDS: asctime, levelname, levelno, message, name, created. ###"
        },

        "twilio": {
            "sid": "",
            "secret": "",
            "from_number": "",
            "#info#": "### YOU CAN CREATE A FREE ACCOUNT AT: https://www.twilio.com/try-twilio.  ###",
            "#infO#": "###     THIS IS WHERE YOU SPECIFY YOUR TWILIO ACCOUNT API KEY VALUES.     ###"
        },

        "#info#": "### THIS IS THE CONFIG FILE FOR THE DISLOGGER APPLICATION. IT IS A SAMPLE FILE ###",
        "#infO#": "### THAT YOU CAN MODIFY. TO KNOW WHAT TO CHANGE, LOOK AT THE OTHER '#info#'   ###"
    })
}
