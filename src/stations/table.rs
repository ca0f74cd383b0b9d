//! Israel Railways passenger stations as `(id, Hebrew name, English name)`.
//!
//! The id is the station code the timetable API expects in `fromStation` /
//! `toStation` and returns in `orignStation` / `destinationStation`.

pub(crate) const STATIONS: &[(&str, &str, &str)] = &[
    ("300", "פאתי מודיעין", "Pa'ate Modi'in"),
    ("400", "מודיעין - מרכז", "Modi'in - Center"),
    ("700", "קריית חיים", "Kiryat Hayim"),
    ("800", "קריית מוצקין", "Kiryat Motzkin"),
    ("1220", "לב המפרץ", "Lev HaMifrats"),
    ("1240", "יקנעם - כפר יהושע", "Yokne'am - Kfar Yehoshu'a"),
    ("1250", "מגדל העמק - כפר ברוך", "Migdal HaEmek - Kfar Barukh"),
    ("1260", "עפולה ר. איתן", "Afula R. Eitan"),
    ("1280", "בית שאן", "Beit She'an"),
    ("1300", "חוצות המפרץ", "Hutsot HaMifrats"),
    ("1400", "קריית ביאליק", "Kiryat Bialik"),
    ("1500", "עכו - מרכז", "Ako - Center"),
    ("1600", "נהריה", "Nahariya"),
    ("1820", "אחיהוד", "Ahihud"),
    ("1840", "כרמיאל", "Karmiel"),
    ("2100", "חיפה - מרכז השמונה", "Haifa - Center HaShmona"),
    ("2200", "חיפה - בת גלים", "Haifa - Bat Galim"),
    ("2300", "חיפה - חוף הכרמל", "Haifa - Hof HaKarmel"),
    ("2500", "עתלית", "Atlit"),
    ("2800", "בנימינה", "Binyamina"),
    ("2820", "קיסריה - פרדס חנה", "Caesarea - Pardes Hana"),
    ("2940", "רעננה מערב", "Ra'anana West"),
    ("2960", "רעננה דרום", "Ra'anana South"),
    ("3100", "חדרה - מערב", "Hadera - West"),
    ("3300", "נתניה", "Netanya"),
    ("3310", "נתניה - ספיר", "Netanya - Sapir"),
    ("3400", "בית יהושע", "Bet Yehoshu'a"),
    ("3500", "הרצליה", "Herzliya"),
    ("3600", "תל אביב - אוניברסיטה", "Tel Aviv - University"),
    ("3700", "תל אביב - סבידור מרכז", "Tel Aviv - Savidor Center"),
    ("4100", "בני ברק", "Bnei Brak"),
    ("4170", "פתח תקווה - קריית אריה", "Petah Tikva - Kiryat Arye"),
    ("4250", "פתח תקווה - סגולה", "Petah Tikva - Segula"),
    ("4600", "תל אביב - השלום", "Tel Aviv - HaShalom"),
    ("4640", "צומת חולון", "Holon Junction"),
    ("4660", "חולון - וולפסון", "Holon - Wolfson"),
    ("4680", "בת ים - יוספטל", "Bat Yam - Yoseftal"),
    ("4690", "בת ים - קוממיות", "Bat Yam - Komemiyut"),
    ("4800", "כפר חב\"ד", "Kfar Habad"),
    ("4900", "תל אביב - ההגנה", "Tel Aviv - HaHagana"),
    ("5000", "לוד", "Lod"),
    ("5010", "רמלה", "Ramla"),
    ("5150", "לוד - גני אביב", "Lod - Gane Aviv"),
    ("5200", "רחובות", "Rehovot"),
    ("5300", "באר יעקב", "Be'er Ya'akov"),
    ("5410", "יבנה - מזרח", "Yavne - East"),
    ("5800", "אשדוד - עד הלום", "Ashdod - Ad Halom"),
    ("5900", "אשקלון", "Ashkelon"),
    ("6150", "קריית מלאכי - יואב", "Kiryat Malakhi - Yoav"),
    ("6300", "ירושלים - גן החיות התנ\"כי", "Jerusalem - Biblical Zoo"),
    ("6500", "ירושלים - מלחה", "Jerusalem - Malha"),
    ("6700", "ירושלים - יצחק נבון", "Jerusalem - Yitzhak Navon"),
    ("7000", "קריית גת", "Kiryat Gat"),
    ("7300", "באר שבע - צפון/אוניברסיטה", "Be'er Sheva - North/University"),
    ("7320", "באר שבע - מרכז", "Be'er Sheva - Center"),
    ("7500", "דימונה", "Dimona"),
    ("8550", "להבים - רהט", "Lehavim - Rahat"),
    ("8600", "נמל תעופה בן גוריון", "Ben Gurion Airport"),
    ("8700", "כפר סבא - נורדאו", "Kfar Sava - Nordau"),
    ("8800", "ראש העין - צפון", "Rosh Ha'Ayin - North"),
    ("9000", "יבנה - מערב", "Yavne - West"),
    ("9100", "ראשון לציון - הראשונים", "Rishon LeTsiyon - HaRishonim"),
    ("9200", "הוד השרון - סוקולוב", "Hod HaSharon - Sokolov"),
    ("9600", "שדרות", "Sderot"),
    ("9650", "נתיבות", "Netivot"),
    ("9700", "אופקים", "Ofakim"),
    ("9800", "ראשון לציון - משה דיין", "Rishon LeTsiyon - Moshe Dayan"),
];
